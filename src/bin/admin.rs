//! CLI administration tool for reading-club.
//!
//! Accounts and API tokens are provisioned here; the HTTP API only
//! authenticates them.
//!
//! # Usage
//!
//! ```bash
//! # Create a user
//! cargo run --bin admin -- user create --username alice --display-name "Alice"
//!
//! # Issue an API token for that user
//! cargo run --bin admin -- token create --user alice
//!
//! # List / revoke tokens
//! cargo run --bin admin -- token list
//! cargo run --bin admin -- token revoke "Alice phone"
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for `token create`): must match the server's

use reading_club::domain::entities::NewUser;
use reading_club::domain::repositories::{TokenRepository, UserRepository};
use reading_club::infrastructure::persistence::{PgTokenRepository, PgUserRepository};
use reading_club::utils::token::{generate_token, hash_token};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing reading-club.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a user account
    Create {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        display_name: Option<String>,
    },

    /// List all users
    List,
}

#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token for a user
    Create {
        /// Username or user ID the token authenticates as
        #[arg(short, long)]
        user: Option<String>,

        /// Token name (e.g., "Alice phone")
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::Create {
            username,
            display_name,
        } => {
            println!("{}", "👤 Create User".bright_blue().bold());
            println!();

            let username = match username {
                Some(u) => u,
                None => Input::new().with_prompt("Username").interact_text()?,
            };
            let display_name = match display_name {
                Some(d) => d,
                None => Input::new()
                    .with_prompt("Display name")
                    .with_initial_text(username.clone())
                    .interact_text()?,
            };

            let user = repo
                .create(NewUser {
                    username: username.trim().to_string(),
                    display_name: display_name.trim().to_string(),
                })
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

            println!(
                "{} {} (id {})",
                "✅ Created".green().bold(),
                user.username.cyan(),
                user.id.to_string().bright_black()
            );
        }
        UserAction::List => {
            let users = repo
                .list()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

            if users.is_empty() {
                println!("{}", "  No users found".yellow());
                return Ok(());
            }

            println!(
                "  {:<5} {:<24} {:<30} {:<20}",
                "ID".bright_white().bold(),
                "Username".bright_white().bold(),
                "Display name".bright_white().bold(),
                "Created".bright_white().bold()
            );
            println!("  {}", "─".repeat(80).bright_black());

            for user in &users {
                println!(
                    "  {:<5} {:<24} {:<30} {}",
                    user.id.to_string().bright_black(),
                    user.username.cyan(),
                    user.display_name,
                    user.created_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black()
                );
            }

            println!();
            println!("  Total: {}", users.len().to_string().bright_white().bold());
        }
    }

    Ok(())
}

async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let tokens = PgTokenRepository::new(pool.clone());

    match action {
        TokenAction::Create { user, name, yes } => {
            let users = PgUserRepository::new(pool);
            create_token(&tokens, &users, user, name, yes).await?;
        }
        TokenAction::List => list_tokens(&tokens).await?,
        TokenAction::Revoke { name_or_id } => revoke_token(&tokens, name_or_id).await?,
    }

    Ok(())
}

/// Creates a new API token with interactive prompts.
///
/// Only the HMAC of the token (keyed by `TOKEN_SIGNING_SECRET`) is stored;
/// the raw value is displayed once.
async fn create_token(
    tokens: &PgTokenRepository,
    users: &PgUserRepository,
    user: Option<String>,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    let secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let user_ref = match user {
        Some(u) => u,
        None => Input::new().with_prompt("User (name or ID)").interact_text()?,
    };

    let owner = match user_ref.parse::<i64>() {
        Ok(id) => users.find_by_id(id).await,
        Err(_) => users.find_by_username(&user_ref).await,
    }
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
    .context("User not found")?;

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text(format!("{} token", owner.username))
            .interact_text()?,
    };

    let token_value = generate_token();

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  User:  {}", owner.username.cyan());
    println!("  Name:  {}", token_name.cyan());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    tokens
        .create_token(owner.id, &token_name, &hash_token(&secret, &token_value))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/me",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

async fn list_tokens(tokens: &PgTokenRepository) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = tokens
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<6} {:<30} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "User".bright_white().bold(),
        "Name".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<5} {:<6} {:<30} {:<20} {}",
            token.id.to_string().bright_black(),
            token.user_id.to_string().bright_black(),
            token.name.cyan(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", tokens.len().to_string().bright_white().bold());

    Ok(())
}

/// Revokes a token by name or ID after confirmation.
async fn revoke_token(tokens: &PgTokenRepository, name_or_id: String) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => tokens.find_by_id(id).await,
        Err(_) => tokens.find_by_name(&name_or_id).await,
    }
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
    .context("Token not found")?;

    if token.revoked_at.is_some() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    tokens
        .revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!("{}", "✅ Token revoked successfully!".green().bold());

    Ok(())
}

async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let counts: [(&str, &str); 6] = [
        ("Users", "SELECT COUNT(*) FROM users"),
        ("Clubs", "SELECT COUNT(*) FROM clubs"),
        ("Memberships", "SELECT COUNT(*) FROM members"),
        ("Completions", "SELECT COUNT(*) FROM progress"),
        ("Discussions", "SELECT COUNT(*) FROM discussions"),
        (
            "Active tokens",
            "SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL",
        ),
    ];

    for (label, sql) in counts {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(pool).await?;
        println!(
            "  {:<15} {}",
            format!("{label}:"),
            count.to_string().bright_green().bold()
        );
    }
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
