//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs            - Module exports and documentation
//! ├── router.rs         - Main router creation
//! ├── collab_routes.rs  - Real-time gateway route
//! └── api_routes.rs     - REST endpoints
//! ```

/// Main router creation
pub mod router;

/// Real-time gateway route
pub mod collab_routes;

/// REST endpoints
pub mod api_routes;

pub use router::create_router;
