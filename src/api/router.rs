use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, health, household, invitation, member, product, stock};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/signup", post(auth::signup))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Households & membership
        .route("/api/v1/households", get(household::list_households).post(household::create_household))
        .route("/api/v1/households/{household_id}", get(household::get_household).put(household::update_household).delete(household::delete_household))
        .route("/api/v1/households/{household_id}/members", get(member::list_members))
        .route("/api/v1/households/{household_id}/leave", post(household::leave_household))

        // Invitations
        .route("/api/v1/households/{household_id}/invitations", post(invitation::create_invitation))
        .route("/api/v1/invitations/redeem", post(invitation::redeem_invitation))

        // Products & stock
        .route("/api/v1/households/{household_id}/products", get(product::list_products).post(product::create_product))
        .route("/api/v1/households/{household_id}/products/low-stock", get(product::low_stock))
        .route("/api/v1/households/{household_id}/products/{product_id}", put(product::update_product).delete(product::delete_product))
        .route("/api/v1/households/{household_id}/products/{product_id}/stock", post(stock::apply_stock_change))
        .route("/api/v1/households/{household_id}/products/{product_id}/restock", post(stock::restock))
        .route("/api/v1/households/{household_id}/shopping-list", get(product::shopping_list))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
