//! Backend Error Module
//!
//! This module defines the error type shared by every backend component and
//! its conversion into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! All failures are local to the request that triggered them: nothing
//! retries automatically and no error aborts the process. Real-time
//! admission failures never reach this type's response path as a partial
//! session; the connection is simply refused.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
