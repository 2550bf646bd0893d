//! # Backend Service
//!
//! Thin entry point that delegates to lib-web for server setup.

use lib_web::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = ServerConfig {
        migrations_path: "migrations",
        ..ServerConfig::from_env()
    };

    start_server(config).await
}
