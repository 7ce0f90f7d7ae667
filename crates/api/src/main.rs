use anyhow::Context;

use meister_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal in production.
    let _ = dotenvy::dotenv();
    let config = AppConfig::from_env().context("invalid configuration")?;
    meister_observability::init(config.log_format);

    if config.database.is_none() {
        tracing::warn!("DATABASE_URL is not set; orders will be refused");
    }
    if config.email.api_key.is_none() {
        tracing::warn!("RESEND_API_KEY is not set; order emails are disabled");
    }

    let services = meister_api::app::services::build_services(&config).await?;
    let app = meister_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
