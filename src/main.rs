// src/main.rs

use exam_practice::config::Config;
use exam_practice::routes;
use exam_practice::state::AppState;
use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from .env (if present) and the environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    for ignored in &config.ignored_vars {
        tracing::warn!("{}", ignored);
    }

    tracing::info!(
        "Mock sets: {} mcq / {} written questions, tutor delay {:?}",
        config.mcq_question_count,
        config.written_question_count,
        config.ai_reply_delay
    );

    let addr: SocketAddr = config.bind_address.parse()?;

    // In-memory state, seeded with the default subjects
    let state = AppState::new(config);

    // Create the Axum application router
    let app = routes::create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Start the server
    axum::serve(listener, app).await?;

    Ok(())
}
