use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{get_permission_by_id, get_permissions, get_permissions_by_ids};
use crate::guarded;
use crate::middleware::policy;
use crate::state::AppState;

pub fn init_permissions_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_permissions).route_layer(guarded!(state, policy::LIST_PERMISSIONS)),
        )
        .route(
            "/by-ids",
            post(get_permissions_by_ids)
                .route_layer(guarded!(state, policy::READ_PERMISSIONS_BY_IDS)),
        )
        .route(
            "/{id}",
            get(get_permission_by_id).route_layer(guarded!(state, policy::READ_PERMISSION)),
        )
}
