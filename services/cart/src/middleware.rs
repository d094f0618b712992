//! Session cookie handling and the authentication gates

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::error;

use crate::{error::ApiError, routes::serve_page, state::AppState};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "session";

/// Authenticated user, inserted into request extensions by the gates
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub username: String,
}

/// Create session cookie
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Create removal cookie for session
pub fn clear_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build();
    cookie.make_removal();
    cookie
}

/// Resolve the session cookie in `headers` to a user, if any
pub async fn current_user(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<SessionUser>, ApiError> {
    let jar = CookieJar::from_headers(headers);
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };

    let username = state.sessions.resolve(cookie.value()).await.map_err(|e| {
        error!("Failed to resolve session: {}", e);
        ApiError::from(e)
    })?;

    Ok(username.map(|username| SessionUser { username }))
}

/// Gate for API routes: 401 envelope without a valid session
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let user = current_user(&state, req.headers())
        .await?
        .ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Gate for pages: 401 with the login page without a valid session
pub async fn page_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match current_user(&state, req.headers()).await {
        Ok(Some(user)) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Ok(None) => serve_page(&state.public_dir, "login.html", StatusCode::UNAUTHORIZED).await,
        Err(e) => e.into_response(),
    }
}
