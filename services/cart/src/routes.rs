//! Cart service routes

use axum::{
    Extension, Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{Value, json};
use std::path::Path;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::{
    error::{ApiError, ApiResult},
    middleware::{
        SESSION_COOKIE, SessionUser, auth_middleware, clear_session_cookie, current_user,
        page_middleware, session_cookie,
    },
    models::{Credentials, SaveCartRequest},
    state::AppState,
};

/// Page shown to anonymous visitors
const LOGIN_PAGE: &str = "login.html";
/// Page behind the session gate
const MAIN_PAGE: &str = "main.html";

/// Create the router for the cart service
pub fn create_router(state: AppState) -> Router {
    let protected_api = Router::new()
        .route("/api/cart", get(get_cart).post(save_cart))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let protected_pages = Router::new()
        .route("/main.html", get(main_page))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            page_middleware,
        ));

    Router::new()
        .route("/", get(login_page))
        .route("/health", get(health_check))
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/me", get(me))
        .merge(protected_api)
        .merge(protected_pages)
        .fallback_service(ServeDir::new(&state.public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Read an HTML page from `dir`
pub async fn serve_page(dir: &Path, page: &str, status: StatusCode) -> Response {
    match tokio::fs::read_to_string(dir.join(page)).await {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("Failed to read page {}: {}", page, e);
            ApiError::InternalServerError.into_response()
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "cart-service"
    }))
}

/// Login page, also served at the root
pub async fn login_page(State(state): State<AppState>) -> Response {
    serve_page(&state.public_dir, LOGIN_PAGE, StatusCode::OK).await
}

/// Protected cart page
pub async fn main_page(State(state): State<AppState>) -> Response {
    serve_page(&state.pages_dir, MAIN_PAGE, StatusCode::OK).await
}

/// User registration endpoint
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(credentials) = payload?;
    let (username, password) = credentials
        .into_parts()
        .ok_or_else(|| ApiError::InvalidInput("Username and password are required".to_string()))?;

    state.user_repository.register(&username, &password).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Registered successfully. You can now log in."
    })))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<(CookieJar, Json<Value>)> {
    // Any unusable body is a failed login, not a malformed request
    let Json(credentials) = payload.map_err(|rejection| {
        warn!("Rejected login body: {}", rejection.body_text());
        ApiError::InvalidCredentials
    })?;
    let (username, password) = credentials
        .into_parts()
        .ok_or(ApiError::InvalidCredentials)?;

    if !state.user_repository.verify(&username, &password).await? {
        warn!("Failed login attempt for user: {}", username);
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.sessions.create_session(&username).await?;
    info!("User logged in: {}", username);

    Ok((
        jar.add(session_cookie(token)),
        Json(json!({
            "ok": true,
            "message": "Logged in",
            "username": username
        })),
    ))
}

/// Logout endpoint; always succeeds
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string());

    if let Some(token) = token {
        if let Err(e) = state.sessions.destroy(&token).await {
            error!("Failed to delete session: {}", e);
        }
    }

    (jar.add(clear_session_cookie()), Json(json!({ "ok": true })))
}

/// Current user endpoint
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Json<Value>> {
    let user = current_user(&state, &headers)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(json!({
        "ok": true,
        "username": user.username
    })))
}

/// Load the current user's cart
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> ApiResult<Json<Value>> {
    let cart = state.cart_repository.load(&user.username).await?;

    Ok(Json(json!({
        "ok": true,
        "cart": cart
    })))
}

/// Replace the current user's cart
pub async fn save_cart(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
    payload: Result<Json<SaveCartRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload?;
    let cart = request.into_cart()?;

    let saved = state.cart_repository.save(&user.username, &cart).await?;

    Ok(Json(json!({
        "ok": true,
        "saved": saved
    })))
}
