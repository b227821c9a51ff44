//! To-do API server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────────▶ tower-http layers ──▶ lookup / quota middleware ──▶ handler
//!                        (request id, trace,    (each step may end the       │
//!                         timeout, limits)       chain with an error)        ▼
//!                                                                        UserStore
//!     Client Response                                                  (RwLock, indexes)
//!     ◀───────────────── { ...entity } or { "error": msg } ◀────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use todo_api::lifecycle::{start, StartupOptions};

#[derive(Parser)]
#[command(name = "todo-api")]
#[command(about = "In-memory multi-user to-do list API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    start(StartupOptions {
        config_path: args.config,
        bind_override: args.bind,
    })
    .await?;

    Ok(())
}
