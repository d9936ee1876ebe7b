use product_core::Product;

#[test]
fn backend_record_deserializes_with_extra_fields() {
    let json = r#"{
        "id": 1,
        "url": "http://x",
        "title": "Kettle",
        "description": "Steel kettle",
        "price": "$20",
        "contact": "",
        "size": "",
        "category": "Home",
        "created_at": "2024-05-01T10:00:00.123456",
        "updated_at": "2024-05-02T08:15:00"
    }"#;

    let product: Product = serde_json::from_str(json).expect("product");
    assert_eq!(product.id, 1);
    assert_eq!(product.title.as_deref(), Some("Kettle"));
    assert_eq!(product.url, "http://x");
    assert_eq!(
        product.updated_at.map(|ts| ts.to_string()),
        Some("2024-05-02 08:15:00".to_string())
    );
    assert!(product.created_at.is_some());
}

#[test]
fn camel_case_timestamp_and_nulls_are_accepted() {
    let json = r#"{"id": 7, "url": "http://y", "title": null, "updatedAt": "2024-05-02T08:15:00Z"}"#;

    let product: Product = serde_json::from_str(json).expect("product");
    assert_eq!(product.title, None);
    assert_eq!(product.price, None);
    assert!(product.updated_at.is_some());
}

#[test]
fn unparseable_timestamp_is_treated_as_absent() {
    let json = r#"{"id": 2, "url": "http://z", "updated_at": "last tuesday"}"#;

    let product: Product = serde_json::from_str(json).expect("product");
    assert_eq!(product.updated_at, None);
}

#[test]
fn non_text_timestamps_do_not_fail_the_record() {
    for raw in ["1714557600.5", "true", r#"{"$date": 1}"#, "[1, 2]"] {
        let json = format!(r#"{{"id": 3, "url": "http://x", "updated_at": {raw}}}"#);
        let product: Product = serde_json::from_str(&json).expect("product");
        assert_eq!(product.updated_at, None, "updated_at: {raw}");
    }
}

#[test]
fn one_bad_timestamp_keeps_the_rest_of_the_list() {
    let json = r#"[
        {"id": 1, "url": "http://a", "updated_at": 1714557600.5},
        {"id": 2, "url": "http://b", "updated_at": "2024-05-02T08:15:00"}
    ]"#;

    let products: Vec<Product> = serde_json::from_str(json).expect("list");
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].updated_at, None);
    assert!(products[1].updated_at.is_some());
}

#[test]
fn snake_and_camel_keys_together_prefer_snake_case() {
    let json = r#"{
        "id": 4,
        "url": "http://x",
        "updated_at": "2024-05-02T08:15:00",
        "updatedAt": "2023-01-01T00:00:00",
        "createdAt": "2024-04-01T00:00:00"
    }"#;

    let product: Product = serde_json::from_str(json).expect("product");
    assert_eq!(
        product.updated_at.map(|ts| ts.to_string()),
        Some("2024-05-02 08:15:00".to_string())
    );
    assert_eq!(
        product.created_at.map(|ts| ts.to_string()),
        Some("2024-04-01 00:00:00".to_string())
    );
}

#[test]
fn unparseable_snake_case_falls_back_to_camel_case() {
    let json = r#"{"id": 5, "url": "http://x", "updated_at": "soon", "updatedAt": "2024-05-02T08:15:00"}"#;

    let product: Product = serde_json::from_str(json).expect("product");
    assert!(product.updated_at.is_some());
}

#[test]
fn missing_id_is_rejected() {
    let json = r#"{"url": "http://z"}"#;

    assert!(serde_json::from_str::<Product>(json).is_err());
}
