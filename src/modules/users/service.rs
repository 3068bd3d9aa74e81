use anyhow::anyhow;
use chrono::Utc;
use tracing::{info, instrument};

use usersvc_core::{
    AppError, LinkBase, Pageable, PaginationResponse, hash_password, hydrate, paginate,
};
use usersvc_models::{
    CreateUserDto, DeleteResponse, Role, UpdateUserDto, User, UserId, UserResponse,
};
use usersvc_observability::track_user_created;

use crate::modules::roles::RoleService;
use crate::state::AppState;

pub struct UserService;

/// Lower-cased, trimmed form used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserService {
    /// Attaches resolved roles to a batch of users with a single role lookup.
    pub async fn with_roles(state: &AppState, users: Vec<User>) -> Result<Vec<UserResponse>, AppError> {
        let hydrated = hydrate(
            users,
            |user| user.role_ids.as_slice(),
            |ids| RoleService::find_roles_by_ids(state, ids),
            |role: &Role| role.id,
        )
        .await?;

        Ok(hydrated
            .into_iter()
            .map(|h| {
                let (user, roles) = h.into_parts();
                UserResponse::from_parts(user, roles)
            })
            .collect())
    }

    async fn with_roles_one(state: &AppState, user: User) -> Result<UserResponse, AppError> {
        Self::with_roles(state, vec![user])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::internal(anyhow!("Hydration dropped the user")))
    }

    async fn ensure_email_available(
        state: &AppState,
        email: &str,
        owner: Option<UserId>,
    ) -> Result<(), AppError> {
        match state.users().find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => Err(AppError::bad_request(anyhow!(
                "User with email {} already exists",
                email
            ))),
            _ => Ok(()),
        }
    }

    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn create_user(state: &AppState, dto: CreateUserDto) -> Result<UserResponse, AppError> {
        let email = normalize_email(&dto.email);
        Self::ensure_email_available(state, &email, None).await?;

        let password_hash = hash_password(&dto.password)?;
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email,
            password_hash,
            full_name: dto.full_name.trim().to_string(),
            picture_url: dto.picture_url.unwrap_or_default(),
            created_at: now,
            updated_at: now,
            role_ids: dto.role_ids,
        };

        state.users().save(&user).await?;
        track_user_created("api");
        info!(user_id = %user.id, "User created");

        Self::with_roles_one(state, user).await
    }

    #[instrument(skip(state))]
    pub async fn get_all_users(state: &AppState) -> Result<Vec<UserResponse>, AppError> {
        let users = state.users().find_all().await?;
        Self::with_roles(state, users).await
    }

    #[instrument(skip(state))]
    pub async fn get_user_by_id(state: &AppState, id: &str) -> Result<UserResponse, AppError> {
        let id = UserId::parse(id)?;
        let user = state
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        Self::with_roles_one(state, user).await
    }

    #[instrument(skip(state))]
    pub async fn get_user_by_email(state: &AppState, email: &str) -> Result<UserResponse, AppError> {
        let user = state
            .users()
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        Self::with_roles_one(state, user).await
    }

    /// Unknown IDs are left out of the result.
    #[instrument(skip(state, ids), fields(count = ids.len()))]
    pub async fn get_users_by_ids(
        state: &AppState,
        ids: &[UserId],
    ) -> Result<Vec<UserResponse>, AppError> {
        let users = state.users().find_by_ids(ids).await?;
        Self::with_roles(state, users).await
    }

    #[instrument(skip(state, dto), fields(user_id = %dto.id))]
    pub async fn update_user(state: &AppState, dto: UpdateUserDto) -> Result<UserResponse, AppError> {
        let users = state.users();
        let mut user = users
            .find_by_id(dto.id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        let email = normalize_email(&dto.email);
        if email != user.email {
            Self::ensure_email_available(state, &email, Some(user.id)).await?;
        }

        if let Some(password) = dto.password.as_deref().filter(|p| !p.is_empty()) {
            if password.chars().count() < 8 {
                return Err(AppError::unprocessable(anyhow!(
                    "password must be at least 8 characters"
                )));
            }
            user.password_hash = hash_password(password)?;
        }

        user.email = email;
        user.full_name = dto.full_name.trim().to_string();
        if let Some(picture_url) = dto.picture_url {
            user.picture_url = picture_url;
        }
        user.role_ids = dto.role_ids;
        user.updated_at = Utc::now();

        users.save(&user).await?;
        info!(user_id = %user.id, "User updated");

        Self::with_roles_one(state, user).await
    }

    #[instrument(skip(state))]
    pub async fn delete_user(state: &AppState, id: &str) -> Result<DeleteResponse, AppError> {
        let id = UserId::parse(id)?;

        if !state.users().delete(id).await? {
            return Err(AppError::not_found(anyhow!("User not found")));
        }
        info!(user_id = %id, "User deleted");

        Ok(DeleteResponse::deleted("User deleted successfully"))
    }

    #[instrument(skip(state, links))]
    pub async fn get_users_page(
        state: &AppState,
        pageable: Pageable,
        links: LinkBase,
    ) -> Result<PaginationResponse<UserResponse>, AppError> {
        let mut page = paginate(&state.users(), &pageable, &links).await?;
        let users = std::mem::take(&mut page.data);
        let data = Self::with_roles(state, users).await?;

        Ok(page.with_data(data))
    }
}
