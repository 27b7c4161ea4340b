use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Currency symbol, optional whitespace, then digits with thousands separators
    static ref PRICE_REGEX: Regex = Regex::new(r"[$₹€£]\s*[\d,]+").unwrap();
}

/// First price-looking substring of `text`, e.g. `"$1,200"` or `"₹ 99"`.
pub fn find_price(text: &str) -> Option<&str> {
    PRICE_REGEX.find(text).map(|m| m.as_str())
}

pub fn contains_price(text: &str) -> bool {
    PRICE_REGEX.is_match(text)
}
