use std::time::Duration;

pub const APP_TITLE: &str = "Product Scraper";
pub const URL_PLACEHOLDER: &str = "Paste product URL here (example: flipkart product URL)";
pub const SEARCH_PLACEHOLDER: &str = "Search products (title, description, category)";
pub const SEARCH_BUTTON: &str = "Search";
pub const RELOADING_LABEL: &str = "Reloading...";

/// Poll interval for terminal input; also paces message draining.
pub const TICK: Duration = Duration::from_millis(75);
pub const TOAST_LIFETIME: Duration = Duration::from_secs(5);

pub const HINT_FORM: &str = "Enter: scrape  Ctrl+F: force  Tab: next  Esc: quit";
pub const HINT_SEARCH: &str = "Enter: search now  Ctrl+U: clear  Tab: next  Esc: quit";
pub const HINT_PRODUCTS: &str = "↑/↓: select  r: refetch  u: reload  Tab: next  q/Esc: quit";
