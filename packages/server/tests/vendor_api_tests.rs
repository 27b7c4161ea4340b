//! Vendor CRUD and gift search through the HTTP router.

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use gifting_core::domains::gifts::{WebGiftIdeas, WebProduct, WebVendor};
use gifting_core::domains::vendors::Vendor;
use gifting_core::kernel::test_dependencies::MockGiftSearch;
use gifting_core::kernel::TestDependencies;
use serde_json::json;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn save_vendor_folds_products_into_additional_info(ctx: &TestHarness) {
    let (status, body) = json_request(
        ctx.app(),
        Method::POST,
        "/save-vendor",
        Some(json!({
            "name": "Luxe Leatherworks",
            "contact": "+1 555 0100",
            "category": "Stationery",
            "website": "luxe.example",
            "additional_info": {"tagline": "Handmade"},
            "image_path": "uploads/front.png",
            "products": "Wallets, Journals"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Vendor saved successfully");

    let id = body["id"].as_i64().expect("id");
    let vendor = Vendor::find_by_id(id, &ctx.db_pool)
        .await
        .unwrap()
        .expect("vendor stored");
    assert_eq!(vendor.name.as_deref(), Some("Luxe Leatherworks"));
    assert_eq!(vendor.additional_info["tagline"], "Handmade");
    assert_eq!(vendor.additional_info["products_sold"], "Wallets, Journals");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn cards_lists_newest_first(ctx: &TestHarness) {
    let first = insert_vendor(&ctx.db_pool, &vendor_input("Old Mill", "Food", "Flour")).await;
    let second = insert_vendor(&ctx.db_pool, &vendor_input("New Forge", "Metal", "Pens")).await;

    let (status, body) = json_request(ctx.app(), Method::GET, "/cards", None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .expect("list")
        .iter()
        .filter_map(|v| v["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![second, first]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_replaces_all_fields(ctx: &TestHarness) {
    let id = insert_vendor(&ctx.db_pool, &vendor_input("Old Mill", "Food", "Flour")).await;

    let (status, body) = json_request(
        ctx.app(),
        Method::PUT,
        &format!("/update-vendor/{}", id),
        Some(json!({
            "name": "Old Mill Bakery",
            "contact": "bakery@mill.example",
            "category": "Food",
            "website": "mill.example",
            "additional_info": {}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Vendor updated successfully");

    let vendor = Vendor::find_by_id(id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(vendor.name.as_deref(), Some("Old Mill Bakery"));
    assert_eq!(vendor.contact.as_deref(), Some("bakery@mill.example"));
    assert!(vendor.additional_info.is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_and_delete_missing_vendor_return_404(ctx: &TestHarness) {
    let (status, body) = json_request(
        ctx.app(),
        Method::PUT,
        "/update-vendor/999",
        Some(json!({"name": "Ghost"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Vendor 999 not found");

    let (status, body) = json_request(ctx.app(), Method::DELETE, "/delete-vendor/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Vendor 999 not found");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn delete_removes_vendor(ctx: &TestHarness) {
    let id = insert_vendor(&ctx.db_pool, &vendor_input("Old Mill", "Food", "Flour")).await;

    let (status, body) =
        json_request(ctx.app(), Method::DELETE, &format!("/delete-vendor/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Vendor deleted successfully");
    assert_eq!(Vendor::count(&ctx.db_pool).await.unwrap(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn search_gifts_merges_saved_vendors_and_web_ideas(ctx: &TestHarness) {
    insert_vendor(
        &ctx.db_pool,
        &vendor_input("Green Roots", "Bamboo Goods", "Bamboo desk sets"),
    )
    .await;
    insert_vendor(
        &ctx.db_pool,
        &vendor_input("Bean There", "Coffee", "Coffee hampers"),
    )
    .await;
    insert_vendor(&ctx.db_pool, &vendor_input("Tin Can", "Metal", "Pens")).await;

    let search = MockGiftSearch::new().with_ideas(WebGiftIdeas {
        products: vec![WebProduct {
            title: Some("Bamboo Cup".to_string()),
            price: Some("$12".to_string()),
            ..Default::default()
        }],
        vendors: vec![WebVendor {
            name: Some("Roastery Co".to_string()),
            ..Default::default()
        }],
    });
    let app = ctx.app_with(TestDependencies::new().mock_gift_search(search.clone()));

    let (status, body) = json_request(
        app,
        Method::POST,
        "/search-gifts",
        Some(json!({"query": "bamboo coffee"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let internal = body["internal_results"].as_array().expect("internal");
    let titles: Vec<&str> = internal.iter().filter_map(|r| r["title"].as_str()).collect();
    assert_eq!(internal.len(), 2);
    assert!(titles.contains(&"Gift from Green Roots"));
    assert!(titles.contains(&"Gift from Bean There"));
    assert!(internal.iter().all(|r| r["source"] == "Internal Database"));

    assert_eq!(body["web_products"][0]["title"], "Bamboo Cup");
    assert_eq!(body["web_products"][0]["link"], "#");
    assert_eq!(body["web_vendors"][0]["title"], "Roastery Co");
    assert_eq!(body["web_vendors"][0]["source"], "Global Vendor");

    assert_eq!(search.queries(), vec!["bamboo coffee".to_string()]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn blank_query_skips_ai_search(ctx: &TestHarness) {
    let search = MockGiftSearch::new();
    let app = ctx.app_with(TestDependencies::new().mock_gift_search(search.clone()));

    let (status, body) =
        json_request(app, Method::POST, "/search-gifts", Some(json!({"query": "   "}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"internal_results": [], "web_products": [], "web_vendors": []})
    );
    assert!(search.queries().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn health_reports_database_ok(ctx: &TestHarness) {
    let (status, body) = json_request(ctx.app(), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "ok");
    assert_eq!(body["database"]["vendors"], 0);
}
