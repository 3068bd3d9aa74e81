//! Fake user seeding for development and load testing.

use std::sync::Arc;
use std::time::Instant;

use anyhow::anyhow;
use chrono::{Duration, Utc};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;

use usersvc_models::{DEFAULT_USER_ROLE, RoleId, User, UserId};
use usersvc_store::{DocumentStore, RoleRepository, UserRepository};

/// Generates `count` users sharing one password hash.
///
/// Creation times are spread one second apart so listings have a stable
/// newest-first order.
pub fn generate_users(count: usize, password_hash: &str, role_ids: &[RoleId]) -> Vec<User> {
    let base = Utc::now();

    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let created_at = base - Duration::seconds(idx as i64);

            User {
                id: UserId::new(),
                email: format!(
                    "{}.{}+seed{}@example.com",
                    first_name.to_lowercase(),
                    last_name.to_lowercase(),
                    idx
                ),
                password_hash: password_hash.to_string(),
                full_name: format!("{} {}", first_name, last_name),
                picture_url: String::new(),
                created_at,
                updated_at: created_at,
                role_ids: role_ids.to_vec(),
            }
        })
        .collect()
}

/// Inserts `count` fake users holding the default role, if it exists.
///
/// Returns the number of users written.
pub async fn seed_users(
    store: Arc<dyn DocumentStore>,
    count: usize,
    password: &str,
) -> anyhow::Result<usize> {
    let start_time = Instant::now();
    println!("👥 Seeding {} users...", count);

    let role_ids: Vec<RoleId> = RoleRepository::new(store.clone())
        .find_by_code(DEFAULT_USER_ROLE)
        .await?
        .map(|role| vec![role.id])
        .unwrap_or_default();
    if role_ids.is_empty() {
        println!("   ⚠️  {} role not found, users are created without roles", DEFAULT_USER_ROLE);
    }

    let password_hash = usersvc_core::hash_password(password)
        .map_err(|e| anyhow!("Failed to hash password: {}", e.error))?;
    let users = generate_users(count, &password_hash, &role_ids);

    let repository = UserRepository::new(store);
    for user in &users {
        repository.save(user).await?;
    }

    println!(
        "   ✅ Seeded {} users in {:.2?}",
        users.len(),
        start_time.elapsed()
    );
    Ok(users.len())
}
