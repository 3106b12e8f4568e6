//! Server command implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use super::open_store;

pub async fn cmd_serve(data_path: &Path, host: &str, port: u16) -> Result<()> {
    let store = open_store(data_path);

    println!("🚀 Starting Coach web server...");
    println!("   Data file: {}", store.path().display());
    println!("   Listening: http://{}:{}", host, port);
    if !store.exists() {
        println!("   ⚠️  Data file not found; it will be created on the first added transaction");
    }

    let config = coach_server::ServerConfig::from_env();
    if !config.allowed_origins.is_empty() {
        println!(
            "   🌐 Allowed origins: {} (COACH_ALLOWED_ORIGINS)",
            config.allowed_origins.join(", ")
        );
    }
    println!();
    println!("   Press Ctrl+C to stop");

    coach_server::serve(Arc::new(store), host, port, config).await?;

    Ok(())
}
