//! Server Module
//!
//! This module contains the server-side code for initializing and
//! configuring the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Configuration loading from the environment
//! └── init.rs         - State construction and app creation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use syncpad::backend::server::{config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Application state and FromRef implementations
pub mod state;

/// Configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, HistoryBackendConfig, ServerConfig};
pub use init::{build_state, create_app};
pub use state::AppState;
