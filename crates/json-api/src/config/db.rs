//! Database Config

use clap::Args;

/// Document store settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string for the document store
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,
}
