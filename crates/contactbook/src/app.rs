use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        contact::{add_contact, get_contact_info, get_email, get_phone_number, replace_contacts},
        health::{healthz, livez},
        users::{create_user, delete_user, list_users},
    },
    state::AppState,
};

/// User and contact routes. Collection routes answer with and without a
/// trailing slash.
fn api_routes() -> Router<AppState> {
    let users = get(list_users).post(create_user).delete(delete_user);
    let contact = get(get_contact_info)
        .post(add_contact)
        .put(replace_contacts);

    Router::new()
        .route("/users", users.clone())
        .route("/users/", users)
        .route("/users/{id}/contact", contact.clone())
        .route("/users/{id}/contact/", contact)
        .route("/users/{id}/contact/email/{pk}", get(get_email))
        .route("/users/{id}/contact/phone-number/{pk}", get(get_phone_number))
}

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let timeout = state.request_timeout;

    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .merge(api_routes())
        .nest("/api/v1", api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .with_state(state)
}
