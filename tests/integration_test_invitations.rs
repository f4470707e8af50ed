mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

async fn create_household(app: &TestApp, auth: &common::AuthHeaders, name: &str) -> String {
    let res = app.request("POST", "/api/v1/households", auth, Some(json!({"name": name}))).await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_invitation_generation_is_idempotent_while_active() {
    let app = TestApp::new().await;
    let ana = app.signup("ana@example.com", "supersecret1", "Ana").await;
    let hid = create_household(&app, &ana, "Casa").await;

    let res = app.request("POST", &format!("/api/v1/households/{}/invitations", hid), &ana, Some(json!({}))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let first = parse_body(res).await;
    let code = first["code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    assert!(first["seconds_remaining"].as_i64().unwrap() > 0);

    // Second request before expiry returns the very same invitation
    let res = app.request("POST", &format!("/api/v1/households/{}/invitations", hid), &ana, Some(json!({}))).await;
    let second = parse_body(res).await;
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["code"].as_str().unwrap(), code);
}

#[tokio::test]
async fn test_redeem_joins_with_the_invited_role_and_accepts_once() {
    let app = TestApp::new().await;
    let ana = app.signup("ana@example.com", "supersecret1", "Ana").await;
    let bob = app.signup("bob@example.com", "supersecret1", "Bob").await;
    let hid = create_household(&app, &ana, "Casa").await;

    let res = app.request("POST", &format!("/api/v1/households/{}/invitations", hid), &ana, Some(json!({"role": "admin"}))).await;
    let invitation = parse_body(res).await;
    let code = invitation["code"].as_str().unwrap().to_string();

    let res = app.request("POST", "/api/v1/invitations/redeem", &bob, Some(json!({"code": code}))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let household = parse_body(res).await;
    assert_eq!(household["id"].as_str().unwrap(), hid);

    // Exactly one membership row with the invitation's role
    let res = app.request("GET", &format!("/api/v1/households/{}/members", hid), &ana, None).await;
    let members = parse_body(res).await;
    let bob_rows: Vec<_> = members.as_array().unwrap().iter()
        .filter(|m| m["user_id"] == bob.user_id.as_str())
        .collect();
    assert_eq!(bob_rows.len(), 1);
    assert_eq!(bob_rows[0]["role"], "admin");

    // accepted_at is stamped
    let accepted_at: Option<String> = sqlx::query_scalar("SELECT accepted_at FROM household_invitations WHERE id = ?")
        .bind(invitation["id"].as_str().unwrap())
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert!(accepted_at.is_some());

    // A second redemption of the same code fails: the invitation is spent
    let eve = app.signup("eve@example.com", "supersecret1", "Eve").await;
    let res = app.request("POST", "/api/v1/invitations/redeem", &eve, Some(json!({"code": invitation["code"]}))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_expired_code_is_rejected_even_when_unaccepted() {
    let app = TestApp::new().await;
    let ana = app.signup("ana@example.com", "supersecret1", "Ana").await;
    let bob = app.signup("bob@example.com", "supersecret1", "Bob").await;
    let hid = create_household(&app, &ana, "Casa").await;

    let res = app.request("POST", &format!("/api/v1/households/{}/invitations", hid), &ana, Some(json!({}))).await;
    let invitation = parse_body(res).await;

    // Push the expiry into the past without touching accepted_at
    sqlx::query("UPDATE household_invitations SET expires_at = ? WHERE id = ?")
        .bind(chrono::Utc::now() - chrono::Duration::minutes(1))
        .bind(invitation["id"].as_str().unwrap())
        .execute(&app.pool)
        .await
        .unwrap();

    let res = app.request("POST", "/api/v1/invitations/redeem", &bob, Some(json!({"code": invitation["code"]}))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // And the inviter's next request mints a fresh code
    let res = app.request("POST", &format!("/api/v1/households/{}/invitations", hid), &ana, Some(json!({}))).await;
    let fresh = parse_body(res).await;
    assert_ne!(fresh["id"], invitation["id"]);
}

#[tokio::test]
async fn test_existing_member_cannot_redeem() {
    let app = TestApp::new().await;
    let ana = app.signup("ana@example.com", "supersecret1", "Ana").await;
    let hid = create_household(&app, &ana, "Casa").await;

    let res = app.request("POST", &format!("/api/v1/households/{}/invitations", hid), &ana, Some(json!({}))).await;
    let code = parse_body(res).await["code"].as_str().unwrap().to_string();

    // The owner is already a member of their own household
    let res = app.request("POST", "/api/v1/invitations/redeem", &ana, Some(json!({"code": code}))).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_plain_members_cannot_invite() {
    let app = TestApp::new().await;
    let ana = app.signup("ana@example.com", "supersecret1", "Ana").await;
    let bob = app.signup("bob@example.com", "supersecret1", "Bob").await;
    let hid = create_household(&app, &ana, "Casa").await;

    let res = app.request("POST", &format!("/api/v1/households/{}/invitations", hid), &ana, Some(json!({}))).await;
    let code = parse_body(res).await["code"].as_str().unwrap().to_string();
    let res = app.request("POST", "/api/v1/invitations/redeem", &bob, Some(json!({"code": code}))).await;
    assert_eq!(res.status(), StatusCode::OK);

    // Bob joined as a plain member and may not generate invitations
    let res = app.request("POST", &format!("/api/v1/households/{}/invitations", hid), &bob, Some(json!({}))).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_malformed_and_unknown_codes() {
    let app = TestApp::new().await;
    let ana = app.signup("ana@example.com", "supersecret1", "Ana").await;

    let res = app.request("POST", "/api/v1/invitations/redeem", &ana, Some(json!({"code": "ABC"}))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.request("POST", "/api/v1/invitations/redeem", &ana, Some(json!({"code": "ZZZZZZ"}))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_racing_redemptions_admit_only_one_user() {
    use chrono::Utc;
    use despensa_backend::domain::models::member::{HouseholdMember, MemberRole};
    use despensa_backend::domain::ports::InvitationRepository;
    use despensa_backend::error::AppError;
    use despensa_backend::infra::repositories::sqlite_invitation_repo::SqliteInvitationRepo;

    let app = TestApp::new().await;
    let ana = app.signup("ana@example.com", "supersecret1", "Ana").await;
    let bob = app.signup("bob@example.com", "supersecret1", "Bob").await;
    let eve = app.signup("eve@example.com", "supersecret1", "Eve").await;
    let hid = create_household(&app, &ana, "Casa").await;

    let res = app.request("POST", &format!("/api/v1/households/{}/invitations", hid), &ana, Some(json!({}))).await;
    let code = parse_body(res).await["code"].as_str().unwrap().to_string();

    // Both redeemers read the same unspent code before either commits
    let repo = SqliteInvitationRepo::new(app.pool.clone());
    let now = Utc::now();
    let bob_snapshot = repo.find_redeemable(&code, now).await.unwrap().unwrap();
    let eve_snapshot = repo.find_redeemable(&code, now).await.unwrap().unwrap();

    let bob_member = HouseholdMember::new(hid.clone(), bob.user_id.clone(), MemberRole::Member);
    repo.accept(&bob_snapshot.id, &bob_member, now).await.unwrap();

    // The code was spent by the first acceptance; the second must roll back
    let eve_member = HouseholdMember::new(hid.clone(), eve.user_id.clone(), MemberRole::Member);
    let second = repo.accept(&eve_snapshot.id, &eve_member, now).await;
    assert!(matches!(second, Err(AppError::NotFound(_))));

    let member_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM household_members WHERE household_id = ?")
        .bind(&hid)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(member_count, 2);
}
