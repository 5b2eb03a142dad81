/// Concrete implementations of the [core] module.
pub mod app;

/// Application starting arguments and configuration.
pub mod config;

/// Core business logic.
pub mod core;

/// Error types.
pub mod error;

use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() {
    let args = crate::config::StartArgs::parse();
    let state = crate::app::state::AppState::new(&args).await;

    info!("filetrail ready");

    crate::app::shell::run(state)
        .await
        .expect("error while running shell");
}
