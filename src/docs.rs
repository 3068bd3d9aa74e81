use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use usersvc_core::{PageInfo, PageLinks, Permission};
use usersvc_models::{
    CreateRoleDto, CreateUserDto, DeleteResponse, LoginResponse, LoginWithEmailRequest,
    LoginWithGoogleRequest, PermissionsByIdsRequest, Role, UpdateRoleDto, UpdateUserDto,
    UserResponse, UsersByIdsRequest,
};

use crate::modules::auth::controller::ErrorResponse;
use crate::router::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health,
        crate::modules::auth::controller::login_with_google,
        crate::modules::auth::controller::login_with_email,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_users_page,
        crate::modules::users::controller::get_users_by_ids,
        crate::modules::users::controller::get_user_by_email,
        crate::modules::users::controller::get_user_by_id,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::roles::controller::create_role,
        crate::modules::roles::controller::get_roles_page,
        crate::modules::roles::controller::get_role_by_id,
        crate::modules::roles::controller::update_role,
        crate::modules::roles::controller::delete_role,
        crate::modules::permissions::controller::get_permissions,
        crate::modules::permissions::controller::get_permission_by_id,
        crate::modules::permissions::controller::get_permissions_by_ids,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            LoginWithGoogleRequest,
            LoginWithEmailRequest,
            LoginResponse,
            CreateUserDto,
            UpdateUserDto,
            UsersByIdsRequest,
            UserResponse,
            CreateRoleDto,
            UpdateRoleDto,
            Role,
            Permission,
            PermissionsByIdsRequest,
            DeleteResponse,
            PageInfo,
            PageLinks,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Authentication", description = "Login endpoints issuing bearer tokens"),
        (name = "Users", description = "User management"),
        (name = "Roles", description = "Role management"),
        (name = "Permissions", description = "Read-only permission catalog"),
    ),
    info(
        title = "usersvc API",
        version = "0.1.0",
        description = "User management service with role-based access control over a fixed permission catalog.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
