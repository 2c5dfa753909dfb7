//! Product service (v1)
//!
//! CRUD over an in-memory product collection.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ listener ─▶ middleware ─▶ routing ─▶ handler ─▶ SharedStore
//!                                (request id,   (path +    (parse,    (mutex over
//!                                 trace span,    method)    validate)  ProductStore)
//!                                 limits,
//!                                 metrics)
//!     Client Response
//!     ◀───────────── Connection: close ◀─ JSON body ◀─────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use product_service::config::{resolve_config, Overrides};
use product_service::lifecycle::startup;

#[derive(Parser)]
#[command(name = "product-service")]
#[command(about = "In-memory product CRUD service", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overriding the configuration file.
    #[arg(short, long)]
    bind: Option<String>,

    /// Listen port, replacing the port of the bind address.
    #[arg(short, long, env = "PRODUCT_SERVICE_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = Overrides {
        bind_address: cli.bind,
        port: cli.port,
    };
    let config = resolve_config(cli.config.as_deref(), &overrides)?;

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
