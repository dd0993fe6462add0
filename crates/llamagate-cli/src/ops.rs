//! One-shot administrative operations that talk to the database directly,
//! without going through a running gateway.

use std::path::Path;

use anyhow::Context;
use llamagate_core::AdminService;
use llamagate_db::{RepoFactory, setup_database};

/// Create an operator account for the admin API and web UI.
pub async fn create_user(db_path: &Path, username: &str, password: &str) -> anyhow::Result<()> {
    let admin = admin_service(db_path).await?;
    let user = admin.create_user(username, password).await?;
    println!("Created user '{}' (id {})", user.username, user.id);
    Ok(())
}

/// Create an API key and print the secret.
pub async fn create_key(db_path: &Path, name: &str) -> anyhow::Result<()> {
    let admin = admin_service(db_path).await?;
    let key = admin.create_api_key(name).await?;
    println!("Created API key '{}' (id {})", key.key_name, key.id);
    println!("Secret: {}", key.api_key);
    Ok(())
}

async fn admin_service(db_path: &Path) -> anyhow::Result<AdminService> {
    let pool = setup_database(db_path)
        .await
        .with_context(|| format!("opening database at {}", db_path.display()))?;
    Ok(AdminService::new(RepoFactory::build_repos(pool)))
}
