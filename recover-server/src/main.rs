//! Recover backend service.
//!
//! Startup is fail-fast: missing Supabase or mailer configuration aborts
//! the process before the listener binds, so a misconfigured deployment
//! never serves traffic.

use anyhow::Context;
use recover_notify::Mailer;
use recover_notify::routes::{NotifyState, create_app};
use recover_supabase::{SupabaseClient, SupabaseSettings};
use std::sync::Arc;

const DEFAULT_ADDR: &str = "0.0.0.0:8787";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    recover_core::init_telemetry("recover-server")
        .map_err(|e| anyhow::anyhow!("telemetry init failed: {}", e))?;

    let settings = SupabaseSettings::load();
    let supabase = SupabaseClient::connect(&settings)?;
    let mailer = Mailer::from_env()?;
    let state = Arc::new(NotifyState::from_env(supabase, mailer));

    let addr = std::env::var("NOTIFY_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "notification service listening");

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
