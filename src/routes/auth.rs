// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Anonymous session routes.
//!
//! There is no external identity provider: a session is an anonymous user ID
//! minted on first contact, carried in a signed JWT. Returning clients with a
//! valid session cookie keep their user ID; everyone else gets a fresh one
//! with a fresh profile.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::auth::{create_jwt, verify_jwt, SESSION_COOKIE};
use crate::models::Profile;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/session", post(start_session))
        .route("/auth/logout", get(logout))
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
}

/// Start (or resume) an anonymous session.
async fn start_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    // A valid existing session keeps its user ID
    let existing = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    if let Some(token) = existing {
        if let Some(user_id) = verify_jwt(&token, &state.config.jwt_signing_key) {
            if let Some(profile) = state.db.get_profile(user_id).await? {
                tracing::debug!(user_id = %user_id, "Resuming existing session");
                let token = create_jwt(user_id, &state.config.jwt_signing_key)?;
                let jar = jar.add(session_cookie(token.clone()));
                return Ok((
                    jar,
                    Json(SessionResponse {
                        token,
                        user_id,
                        username: profile.username,
                    }),
                ));
            }
        }
    }

    // Fresh anonymous user with a fresh profile
    let user_id = Uuid::new_v4();
    let now = chrono::Utc::now().to_rfc3339();
    let profile = Profile::new(user_id, &now);
    state.db.upsert_profile(&profile).await?;

    let token = create_jwt(user_id, &state.config.jwt_signing_key)?;

    tracing::info!(user_id = %user_id, username = %profile.username, "Anonymous session created");

    let jar = jar.add(session_cookie(token.clone()));
    Ok((
        jar,
        Json(SessionResponse {
            token,
            user_id,
            username: profile.username,
        }),
    ))
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Clear the session cookie. The anonymous profile stays in the store.
async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");

    (jar.remove(cookie), Json(LogoutResponse { success: true }))
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
