mod report;
mod store;
mod tui;

use sqlx::Connection;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::fmt::init();
    if std::env::var("ENV").ok().as_deref() != Some("prod") {
        dotenvy::dotenv().ok();
    }

    let db_url = std::env::var("ERP_DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://erp_finance.db?mode=rwc".to_string());
    tracing::info!(%db_url, "opening database");

    // Make sure the schema exists and a fresh database has demo rows to show.
    let mut conn = store::queries::connect(&db_url).await?;
    store::sample_data::create_schema(&mut conn).await?;
    store::sample_data::seed_demo(&mut conn).await?;
    conn.close().await?;

    tui::run_tui(db_url)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok(())
}
