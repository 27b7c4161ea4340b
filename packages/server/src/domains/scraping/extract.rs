//! Heuristic product/price extraction from vendor HTML.
//!
//! Vendor sites share no markup conventions, so extraction runs in tiers:
//!
//! 1. card scan: elements whose class looks like a product card, holding
//!    both a title and a price
//! 2. heading scan (only when the card scan found fewer than 3 pairs):
//!    h2-h4 headings that carry a price themselves or sit next to one
//! 3. generic prices: up to 5 raw price strings when tiers 1-2 found nothing

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

use super::outcome::{PricedItem, ScrapeOutcome, GENERIC_PRICE};
use super::price::{contains_price, find_price};

/// Fewer card-scan hits than this triggers the heading scan.
const MIN_CARD_HITS: usize = 3;
const MAX_HEADINGS: usize = 15;
const MAX_ITEMS: usize = 10;
const MAX_GENERIC_PRICES: usize = 5;

lazy_static! {
    static ref CONTAINERS: Selector = Selector::parse("div, li, article, tr").unwrap();
    static ref NAME_CANDIDATES: Selector = Selector::parse("h2, h3, h4, h5, a").unwrap();
    static ref HEADINGS: Selector = Selector::parse("h2, h3, h4").unwrap();

    static ref CARD_CLASS: Regex = Regex::new(r"(?i)product|item|card|box").unwrap();
    static ref TITLE_CLASS: Regex = Regex::new(r"(?i)title|name").unwrap();
}

/// Run all tiers over a fetched page.
pub fn extract_pricing(html: &str) -> ScrapeOutcome {
    let document = Html::parse_document(html);

    let mut candidates = card_scan(&document);
    if candidates.len() < MIN_CARD_HITS {
        candidates.extend(heading_scan(&document));
    }

    let mut items = dedupe_by_name(candidates);
    if !items.is_empty() {
        items.truncate(MAX_ITEMS);
        return ScrapeOutcome::Structured(items);
    }

    let generic = generic_prices(&document);
    if generic.is_empty() {
        ScrapeOutcome::Empty
    } else {
        ScrapeOutcome::GenericPrices(generic)
    }
}

/// Tier 1: product-card containers with a title and a price.
pub(crate) fn card_scan(document: &Html) -> Vec<PricedItem> {
    document
        .select(&CONTAINERS)
        .filter(|el| el.value().attr("class").is_some_and(|c| CARD_CLASS.is_match(c)))
        .filter_map(|card| {
            let name = card_name(card)?;
            let price = first_price_text(card)?;
            let len = name.chars().count();
            (len > 3 && len < 100).then(|| PricedItem::new(name, price))
        })
        .collect()
}

fn card_name(card: ElementRef) -> Option<String> {
    let titled = card.select(&NAME_CANDIDATES).find(|el| {
        el.value()
            .attr("class")
            .is_some_and(|c| TITLE_CLASS.is_match(c))
    });

    titled
        .or_else(|| card.select(&HEADINGS).next())
        .map(stripped_text)
}

/// First text node under `el` that contains a price, trimmed.
fn first_price_text(el: ElementRef) -> Option<String> {
    el.descendants()
        .filter_map(|node| node.value().as_text())
        .find(|text| contains_price(text))
        .map(|text| text.trim().to_string())
}

/// Tier 2: the first headings of the page, priced inline or by their surroundings.
pub(crate) fn heading_scan(document: &Html) -> Vec<PricedItem> {
    let mut found = Vec::new();

    for heading in document.select(&HEADINGS).take(MAX_HEADINGS) {
        let text = stripped_text(heading);

        if let Some(price) = find_price(&text) {
            let name = text
                .replace(price, "")
                .trim_matches(|c| matches!(c, ' ' | '(' | ')' | '-'))
                .to_string();
            if name.chars().count() > 3 {
                found.push(PricedItem::new(name, price));
            }
        // Blank headings (icon-only, images) never name an item.
        } else if !text.is_empty() && price_follows(document, heading) {
            let parent_price = heading
                .parent()
                .and_then(ElementRef::wrap)
                .map(spaced_text)
                .and_then(|parent_text| find_price(&parent_text).map(str::to_string));

            if let Some(price) = parent_price {
                found.push(PricedItem::new(text, price));
            }
        }
    }

    found
}

/// Whether any text node after `heading` (in document order) holds a price.
fn price_follows(document: &Html, heading: ElementRef) -> bool {
    document
        .root_element()
        .descendants()
        .skip_while(|node| node.id() != heading.id())
        .skip(1)
        .filter_map(|node| node.value().as_text())
        .any(|text| contains_price(text))
}

/// Tier 3: loose price strings labelled as generic.
fn generic_prices(document: &Html) -> Vec<PricedItem> {
    document
        .root_element()
        .descendants()
        .filter_map(|node| node.value().as_text())
        .filter(|text| contains_price(text))
        .take(MAX_GENERIC_PRICES)
        .map(|text| PricedItem::new(GENERIC_PRICE, text.trim()))
        .collect()
}

/// Keep the first pair seen for each exact item name.
fn dedupe_by_name(items: Vec<PricedItem>) -> Vec<PricedItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|p| seen.insert(p.item.clone()))
        .collect()
}

/// Text fragments trimmed and concatenated.
fn stripped_text(el: ElementRef) -> String {
    el.text().map(str::trim).collect()
}

/// Text fragments trimmed, blanks dropped, joined with single spaces.
fn spaced_text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
