//! Doorwright Engine - Console host.
//!
//! Runs one creator session on stdin/stdout:
//!
//! ```text
//! doorwright [kind] [name]
//! ```
//!
//! Type `abort` to cancel the session.

use std::sync::Arc;
use std::time::Duration;

use doorwright_domain::{Player, PlayerId, StructureKind, WorldId};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use doorwright_engine::infrastructure::{
    console::parse_input, settings::load_settings,
};
use doorwright_engine::App;

const EXPIRY_INTERVAL: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doorwright_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Doorwright console host");

    let config = load_settings()?;
    let mut args = std::env::args().skip(1);
    let kind = args.next().map(|raw| raw.parse::<StructureKind>()).transpose()?;
    let name = args.next();

    let app = Arc::new(App::new(&config));
    let player = Player::new(PlayerId::new(), config.host.player_name.clone());
    let world = WorldId::new();

    app.start_session(player.clone(), kind, name).await;

    // Expire the session if the player walks away.
    let expiry_app = app.clone();
    let expiry = tokio::spawn(async move {
        let mut interval = tokio::time::interval(EXPIRY_INTERVAL);
        loop {
            interval.tick().await;
            let now = expiry_app.ports.clock.now();
            if expiry_app.sessions.expire_idle(now).await > 0 {
                tracing::info!("Idle session expired");
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while app.sessions.is_active(player.id) {
        if let Ok(Some(prompt)) = app.sessions.prompt(player.id).await {
            println!("> {}", prompt);
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().eq_ignore_ascii_case("abort") {
            app.sessions.abort(player.id).await?;
            break;
        }
        let Ok(Some(expected)) = app.sessions.expected_input(player.id).await else {
            break;
        };
        match parse_input(expected, &line, world) {
            Ok(input) => {
                // The session may have expired while we were waiting for input.
                if app.sessions.handle_input(player.id, input).await.is_err() {
                    break;
                }
            }
            Err(hint) => println!("[error] {}", hint),
        }
    }

    if app.sessions.is_active(player.id) {
        app.sessions.abort(player.id).await?;
    }
    expiry.abort();

    let flushed = app.sessions.flush_persistence().await;
    tracing::info!(flushed, "Doorwright console host finished");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
