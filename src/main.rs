//! SchoolQuest Agent — desktop companion for the SchoolQuest platform.
//!
//! Logs in, opens the real-time notification channel, and mirrors incoming
//! notifications to the desktop until interrupted.

use std::sync::Arc;

use clap::Parser;
use dialoguer::Password;
use tracing_subscriber::{EnvFilter, fmt};

use schoolquest_api::endpoints::auth::{self, Credentials};
use schoolquest_api::{ApiClient, SessionStore};
use schoolquest_core::config::AppConfig;
use schoolquest_core::types::level::level_info;
use schoolquest_realtime::bridge::desktop::DesktopSink;
use schoolquest_realtime::connection::manager::RealtimeClient;
use schoolquest_realtime::connection::state::ConnectionState;
use schoolquest_realtime::{BellView, NotificationBridge};

#[derive(Debug, Parser)]
#[command(
    name = "schoolquest-agent",
    about = "Desktop companion for SchoolQuest: live notifications outside the browser"
)]
struct Args {
    /// Account email.
    #[arg(long)]
    email: String,
    /// Configuration environment name (config/<env>.toml overlay).
    #[arg(long, default_value = "development")]
    env: String,
    /// Disable mirroring to the desktop notification surface.
    #[arg(long)]
    no_desktop: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match AppConfig::load(&args.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, args).await {
        tracing::error!("Agent error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main agent run function
async fn run(config: AppConfig, args: Args) -> anyhow::Result<()> {
    tracing::info!("Starting SchoolQuest agent v{}", env!("CARGO_PKG_VERSION"));

    let session_store = Arc::new(SessionStore::new());
    let api = ApiClient::new(&config.api, session_store.clone())?;
    api.on_unauthorized(|redirect| {
        tracing::warn!(redirect, "Session expired, logging out");
    });

    let password = match std::env::var("SCHOOLQUEST_PASSWORD") {
        Ok(p) => p,
        Err(_) => Password::new().with_prompt("Password").interact()?,
    };

    let user = auth::login(
        &api,
        &Credentials {
            email: args.email,
            password,
        },
    )
    .await?;

    let level = level_info(user.xp);
    tracing::info!(
        user = %user.name,
        role = %user.role,
        level = level.level,
        rank = level.rank_title,
        "Logged in"
    );

    let bridge = (!args.no_desktop)
        .then(|| Arc::new(NotificationBridge::new(Box::new(DesktopSink::new()))));

    let mut client = RealtimeClient::new(config.api.base_url.clone(), config.realtime.clone());
    if let Some(bridge) = &bridge {
        client = client.with_bridge(bridge.clone());
    }

    let mut session = client.connect(user.id).await?;
    let bell = BellView::new(session.store().clone(), bridge);
    tracing::info!("Realtime channel open, waiting for notifications (Ctrl-C to quit)");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
            state = session.state_changed() => {
                if state == ConnectionState::Closed {
                    tracing::warn!("Realtime connection closed; restart the agent to reconnect");
                    break;
                }
            }
        }
    }

    session.close().await;

    let now = chrono::Utc::now();
    let items = bell.items(now);
    if items.is_empty() {
        println!("Nenhuma notificação nesta sessão.");
    } else {
        println!("Notificações desta sessão:");
        for item in &items {
            let marker = if item.read { " " } else { "*" };
            println!(
                "{marker} {} {}: {} ({})",
                item.icon, item.title, item.message, item.age
            );
        }
        if let Some(badge) = bell.badge() {
            println!("Não lidas: {badge}");
        }
    }

    auth::logout(&api);
    Ok(())
}
