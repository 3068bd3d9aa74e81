use axum::{Router, routing::post};

use super::controller::{login_with_email, login_with_google};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login-with-google", post(login_with_google))
        .route("/login-with-email", post(login_with_email))
}
