use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::controller::{create_role, delete_role, get_role_by_id, get_roles_page, update_role};
use crate::guarded;
use crate::middleware::policy;
use crate::state::AppState;

pub fn init_roles_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_role)
                .route_layer(guarded!(state, policy::CREATE_ROLE))
                .merge(put(update_role).route_layer(guarded!(state, policy::UPDATE_ROLE))),
        )
        .route(
            "/pages",
            get(get_roles_page).route_layer(guarded!(state, policy::GET_ROLES_PAGINATED)),
        )
        .route(
            "/{id}",
            get(get_role_by_id)
                .route_layer(guarded!(state, policy::READ_ROLE))
                .merge(delete(delete_role).route_layer(guarded!(state, policy::DELETE_ROLE))),
        )
}
