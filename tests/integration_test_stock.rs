mod common;

use axum::http::StatusCode;
use common::{parse_body, AuthHeaders, TestApp};
use serde_json::json;

async fn setup_product(app: &TestApp, auth: &AuthHeaders, current: i64, min: i64, ideal: i64) -> (String, String) {
    let res = app.request("POST", "/api/v1/households", auth, Some(json!({"name": "Casa"}))).await;
    let hid = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.request("POST", &format!("/api/v1/households/{}/products", hid), auth, Some(json!({
        "name": "Arroz",
        "current_stock": current,
        "min_recommended": min,
        "ideal_amount": ideal
    }))).await;
    let pid = parse_body(res).await["id"].as_str().unwrap().to_string();

    (hid, pid)
}

async fn history_rows(app: &TestApp, product_id: &str) -> Vec<(i64, String, i64, i64)> {
    sqlx::query_as(
        "SELECT change_amount, change_type, previous_stock, new_stock
         FROM stock_history WHERE product_id = ? ORDER BY created_at"
    )
        .bind(product_id)
        .fetch_all(&app.pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_add_change_updates_stock_and_writes_one_history_row() {
    let app = TestApp::new().await;
    let ana = app.signup("ana@example.com", "supersecret1", "Ana").await;
    let (hid, pid) = setup_product(&app, &ana, 3, 2, 6).await;

    let res = app.request("POST", &format!("/api/v1/households/{}/products/{}/stock", hid, pid), &ana, Some(json!({
        "amount": 5,
        "change_type": "add"
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let outcome = parse_body(res).await;
    assert_eq!(outcome["previous_stock"], 3);
    assert_eq!(outcome["new_stock"], 8);

    let rows = history_rows(&app, &pid).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], (5, "add".to_string(), 3, 8));
}

#[tokio::test]
async fn test_remove_can_push_stock_negative() {
    let app = TestApp::new().await;
    let ana = app.signup("ana@example.com", "supersecret1", "Ana").await;
    let (hid, pid) = setup_product(&app, &ana, 2, 2, 6).await;

    // No floor: consumption beyond the tracked amount goes negative
    let res = app.request("POST", &format!("/api/v1/households/{}/products/{}/stock", hid, pid), &ana, Some(json!({
        "amount": 5,
        "change_type": "remove"
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let outcome = parse_body(res).await;
    assert_eq!(outcome["new_stock"], -3);

    let rows = history_rows(&app, &pid).await;
    assert_eq!(rows[0], (5, "remove".to_string(), 2, -3));
}

#[tokio::test]
async fn test_adjust_sets_the_absolute_value() {
    let app = TestApp::new().await;
    let ana = app.signup("ana@example.com", "supersecret1", "Ana").await;
    let (hid, pid) = setup_product(&app, &ana, 9, 2, 6).await;

    let res = app.request("POST", &format!("/api/v1/households/{}/products/{}/stock", hid, pid), &ana, Some(json!({
        "amount": 1,
        "change_type": "adjust"
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let outcome = parse_body(res).await;
    assert_eq!(outcome["previous_stock"], 9);
    assert_eq!(outcome["new_stock"], 1);
}

#[tokio::test]
async fn test_stock_change_validation() {
    let app = TestApp::new().await;
    let ana = app.signup("ana@example.com", "supersecret1", "Ana").await;
    let (hid, pid) = setup_product(&app, &ana, 3, 2, 6).await;

    for payload in [
        json!({"amount": 0, "change_type": "add"}),
        json!({"amount": -2, "change_type": "remove"}),
        json!({"amount": -1, "change_type": "adjust"}),
    ] {
        let res = app.request("POST", &format!("/api/v1/households/{}/products/{}/stock", hid, pid), &ana, Some(payload)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    // None of the rejected requests left an audit row behind
    assert!(history_rows(&app, &pid).await.is_empty());
}

#[tokio::test]
async fn test_restock_to_min_and_ideal() {
    let app = TestApp::new().await;
    let ana = app.signup("ana@example.com", "supersecret1", "Ana").await;
    let (hid, pid) = setup_product(&app, &ana, 1, 3, 6).await;

    // Buy-to-minimum adds exactly the shortfall
    let res = app.request("POST", &format!("/api/v1/households/{}/products/{}/restock", hid, pid), &ana, Some(json!({
        "target": "min"
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let outcome = parse_body(res).await;
    assert_eq!(outcome["previous_stock"], 1);
    assert_eq!(outcome["new_stock"], 3);

    // Buy-to-ideal tops up the rest
    let res = app.request("POST", &format!("/api/v1/households/{}/products/{}/restock", hid, pid), &ana, Some(json!({
        "target": "ideal"
    }))).await;
    let outcome = parse_body(res).await;
    assert_eq!(outcome["new_stock"], 6);

    // Already at ideal: a no-op with no audit entry
    let res = app.request("POST", &format!("/api/v1/households/{}/products/{}/restock", hid, pid), &ana, Some(json!({
        "target": "ideal"
    }))).await;
    let outcome = parse_body(res).await;
    assert_eq!(outcome["previous_stock"], 6);
    assert_eq!(outcome["new_stock"], 6);

    let rows = history_rows(&app, &pid).await;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], (2, "add".to_string(), 1, 3));
    assert_eq!(rows[1], (3, "add".to_string(), 3, 6));
}

#[tokio::test]
async fn test_overflowing_stock_change_is_rejected() {
    let app = TestApp::new().await;
    let ana = app.signup("ana@example.com", "supersecret1", "Ana").await;
    let (hid, pid) = setup_product(&app, &ana, 1, 2, 6).await;

    let res = app.request("POST", &format!("/api/v1/households/{}/products/{}/stock", hid, pid), &ana, Some(json!({
        "amount": i64::MAX,
        "change_type": "add"
    }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.request("POST", &format!("/api/v1/households/{}/products/{}/stock", hid, pid), &ana, Some(json!({
        "amount": i64::MAX,
        "change_type": "remove"
    }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Stock is untouched and no audit row was written
    let stock: i64 = sqlx::query_scalar("SELECT current_stock FROM products WHERE id = ?")
        .bind(&pid)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(stock, 1);
    assert!(history_rows(&app, &pid).await.is_empty());
}

#[tokio::test]
async fn test_restock_baseline_is_read_inside_the_transaction() {
    use despensa_backend::domain::models::stock::RestockTarget;
    use despensa_backend::domain::ports::ProductRepository;
    use despensa_backend::infra::repositories::sqlite_product_repo::SqliteProductRepo;

    let app = TestApp::new().await;
    let ana = app.signup("ana@example.com", "supersecret1", "Ana").await;
    let (hid, pid) = setup_product(&app, &ana, 1, 3, 10).await;
    let repo = SqliteProductRepo::new(app.pool.clone());

    // A stock change committed after any earlier snapshot must be part of
    // the baseline the shortfall is computed from
    sqlx::query("UPDATE products SET current_stock = 4 WHERE id = ?")
        .bind(&pid)
        .execute(&app.pool)
        .await
        .unwrap();

    let outcome = repo.restock_to_target(&hid, &pid, RestockTarget::Ideal).await.unwrap();
    assert_eq!(outcome.previous_stock, 4);
    assert_eq!(outcome.new_stock, 10);

    // Above target the quick action never lowers stock
    let outcome = repo.restock_to_target(&hid, &pid, RestockTarget::Min).await.unwrap();
    assert_eq!(outcome.previous_stock, 10);
    assert_eq!(outcome.new_stock, 10);
}
