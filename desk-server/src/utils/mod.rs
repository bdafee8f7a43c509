//! Utilities
//!
//! Cross-cutting helpers: HTTP error/response types, logging setup,
//! and the injectable clock.

pub mod clock;
pub mod error;
pub mod logger;

pub use clock::{Clock, SystemClock};
pub use error::{AppError, AppResponse, AppResult};
