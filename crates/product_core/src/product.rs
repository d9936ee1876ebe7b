use chrono::{DateTime, NaiveDateTime};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

pub type ProductId = u64;

/// A scraped product record as stored by the backend.
///
/// Text fields are optional because the scraper is best-effort; the card view
/// substitutes placeholders for anything missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProductRecord")]
pub struct Product {
    pub id: ProductId,
    pub title: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Source page the product was scraped from.
    pub url: String,
    pub contact: Option<String>,
    pub size: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
}

/// Wire shape. Timestamps may arrive snake_case, camelCase, or both; the
/// snake_case value wins when both parse.
#[derive(Deserialize)]
struct ProductRecord {
    id: ProductId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: String,
    #[serde(default)]
    contact: Option<String>,
    #[serde(default)]
    size: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    updated_at: Option<NaiveDateTime>,
    #[serde(default, rename = "updatedAt", deserialize_with = "lenient_timestamp")]
    updated_at_camel: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    created_at: Option<NaiveDateTime>,
    #[serde(default, rename = "createdAt", deserialize_with = "lenient_timestamp")]
    created_at_camel: Option<NaiveDateTime>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            price: record.price,
            category: record.category,
            description: record.description,
            url: record.url,
            contact: record.contact,
            size: record.size,
            updated_at: record.updated_at.or(record.updated_at_camel),
            created_at: record.created_at.or(record.created_at_camel),
        }
    }
}

/// Anything that is neither text nor an integer lands in `Other` and reads as
/// absent.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    EpochMillis(i64),
    Other(IgnoredAny),
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawTimestamp::Text(text)) => parse_timestamp(&text),
        Some(RawTimestamp::EpochMillis(ms)) => {
            DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc())
        }
        Some(RawTimestamp::Other(_)) | None => None,
    })
}

/// Parse a backend timestamp: RFC 3339 (normalized to UTC) or naive ISO-8601.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    raw.parse::<NaiveDateTime>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_naive_iso_with_fraction() {
        let ts = parse_timestamp("2024-05-01T10:00:00.123456").expect("timestamp");
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn rfc3339_offsets_normalize_to_utc() {
        let ts = parse_timestamp("2024-05-01T12:00:00+02:00").expect("timestamp");
        assert_eq!(ts.to_string(), "2024-05-01 10:00:00");
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("  "), None);
    }
}
