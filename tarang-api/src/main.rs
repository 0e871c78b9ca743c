use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tarang_api::{app, AppState};
use tarang_mailer::{Mailer, SandboxMailer, SmtpMailer, SmtpSettings};
use tarang_store::{DbClient, PgBookingStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tarang_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = tarang_store::app_config::Config::load().context("Failed to load config")?;
    tracing::info!("Starting Tarang Travel API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .context("Failed to connect to Postgres")?;
    db.migrate().await.context("Failed to run migrations")?;

    let store = Arc::new(PgBookingStore::new(db.pool.clone()));

    let mailer: Arc<dyn Mailer> = match (&config.mail.username, &config.mail.password) {
        (Some(username), Some(password)) => Arc::new(
            SmtpMailer::new(SmtpSettings {
                host: config.mail.smtp_host.clone(),
                port: config.mail.smtp_port,
                username: username.clone(),
                password: password.clone(),
                from_address: config.mail.from_address.clone(),
                from_name: config.mail.from_name.clone(),
            })
            .context("Failed to build SMTP mailer")?,
        ),
        _ => {
            tracing::warn!("No SMTP credentials configured, using sandbox mailer");
            Arc::new(SandboxMailer::new())
        }
    };

    let app_state = AppState {
        store,
        mailer,
        expose_errors: config.server.expose_errors,
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
