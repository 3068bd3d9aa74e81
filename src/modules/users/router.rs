use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::controller::{
    create_user, delete_user, get_user_by_email, get_user_by_id, get_users, get_users_by_ids,
    get_users_page, update_user,
};
use crate::guarded;
use crate::middleware::policy;
use crate::state::AppState;

pub fn init_users_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_user)
                .route_layer(guarded!(state, policy::CREATE_USER))
                .merge(get(get_users).route_layer(guarded!(state, policy::LIST_USERS)))
                .merge(put(update_user).route_layer(guarded!(state, policy::UPDATE_USER))),
        )
        .route(
            "/pages",
            get(get_users_page).route_layer(guarded!(state, policy::GET_USERS_PAGINATED)),
        )
        .route(
            "/by-ids",
            post(get_users_by_ids).route_layer(guarded!(state, policy::READ_USER)),
        )
        .route(
            "/email/{email}",
            get(get_user_by_email).route_layer(guarded!(state, policy::READ_USER)),
        )
        .route(
            "/{id}",
            get(get_user_by_id)
                .route_layer(guarded!(state, policy::READ_USER))
                .merge(delete(delete_user).route_layer(guarded!(state, policy::DELETE_USER))),
        )
}
