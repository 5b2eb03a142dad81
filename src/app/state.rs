use chrono::Local;
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use crate::core::service::{
    master::MasterCatalog, movement::MovementDesk, registration::Registration,
};

/// Holds the workflow services and the repository handle.
pub struct AppState {
    /// Filetrail workflows, pre-loaded.
    pub services: ServiceState,

    /// The repository handle, kept for tooling and tests.
    pub repo: PgPool,
}

pub struct ServiceState {
    pub registration: Registration<PgPool>,
    pub movement: MovementDesk<PgPool>,
    pub masters: MasterCatalog<PgPool>,
}

impl AppState {
    /// Load the application state using the provided configuration.
    pub async fn new(args: &crate::config::StartArgs) -> Self {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from(args.log()))
            .init();

        let postgres = crate::app::repo::pg::init(&args.db_url()).await;

        let today = Local::now().date_naive();

        let mut registration = Registration::new(postgres.clone(), today);
        let mut movement = MovementDesk::new(postgres.clone(), today);
        let mut masters = MasterCatalog::new(postgres.clone());

        registration.load().await;
        movement.refresh().await;
        masters.load().await;

        Self {
            services: ServiceState {
                registration,
                movement,
                masters,
            },
            repo: postgres,
        }
    }
}
