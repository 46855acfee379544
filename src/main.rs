use anyhow::Context;
use gamenight::{state::AppState, telemetry, users::UserDao, MIGRATOR};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let app_state = AppState::init().await?;

    MIGRATOR
        .run(&app_state.db)
        .await
        .context("apply migrations")?;

    let users = app_state.users().find_all().await?;
    tracing::info!(
        users = users.len(),
        max_connections = app_state.config.db.max_connections,
        "user store ready"
    );

    Ok(())
}
