use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use usersvc_cli::bootstrap::{self, RoleChange};
use usersvc_cli::seeder;
use usersvc_config::StoreConfig;
use usersvc_store::{DocumentStore, PostgresDocumentStore};

#[derive(Parser)]
#[command(name = "usersvc-cli")]
#[command(about = "usersvc CLI - Administrative tools for usersvc", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or repair the built-in ADMIN and USER roles
    Bootstrap,
    /// Create a user holding the ADMIN role
    CreateAdmin {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Full name
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the store with fake users holding the USER role
    SeedUsers {
        /// Number of users to create
        #[arg(short = 'c', long, default_value = "50")]
        count: usize,

        /// Password shared by every seeded user
        #[arg(long, default_value = "password123")]
        password: String,
    },
}

async fn connect() -> anyhow::Result<Arc<dyn DocumentStore>> {
    let config = StoreConfig::from_env();
    let url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let store = PostgresDocumentStore::connect(url, config.max_connections)
        .await
        .context("Failed to connect to database")?;
    Ok(Arc::new(store))
}

fn describe(change: RoleChange) -> &'static str {
    match change {
        RoleChange::Created => "created",
        RoleChange::Updated => "updated",
        RoleChange::Unchanged => "unchanged",
    }
}

async fn handle_bootstrap(store: Arc<dyn DocumentStore>) -> anyhow::Result<()> {
    let report = bootstrap::bootstrap_roles(store).await?;

    println!("\n✅ Roles bootstrapped");
    println!(
        "   {} ({}): {} permissions",
        report.admin.code,
        describe(report.admin_change),
        report.admin.permission_ids.len()
    );
    println!(
        "   {} ({}): {} permissions",
        report.user.code,
        describe(report.user_change),
        report.user.permission_ids.len()
    );
    Ok(())
}

async fn handle_create_admin(
    store: Arc<dyn DocumentStore>,
    email: Option<String>,
    full_name: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let full_name = match full_name {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Full name")
            .interact_text()
            .context("Failed to read full name")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let user = bootstrap::create_admin(store, &email, &full_name, &password).await?;

    println!("\n✅ Admin created successfully!");
    println!("   ID: {}", user.id);
    println!("   Email: {}", user.email);
    println!("   Name: {}", user.full_name);
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    let result = async {
        let store = connect().await?;
        match cli.command {
            Commands::Bootstrap => handle_bootstrap(store).await,
            Commands::CreateAdmin {
                email,
                full_name,
                password,
            } => handle_create_admin(store, email, full_name, password).await,
            Commands::SeedUsers { count, password } => {
                seeder::seed_users(store, count, &password).await.map(|_| ())
            }
        }
    }
    .await;

    if let Err(e) = result {
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}
