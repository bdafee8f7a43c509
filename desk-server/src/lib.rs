//! Desk Server - hotel front-desk booking core
//!
//! # Architecture overview
//!
//! - **Store** (`store`): embedded redb key-value store with the atomic
//!   conditional-transform primitive the booking protocols build on
//! - **Booking** (`booking`): reservation, checkout and reconciliation
//!   protocols plus read views
//! - **HTTP API** (`api`): RESTful routes for rooms, bookings and guests
//!
//! # Module structure
//!
//! ```text
//! desk-server/src/
//! ├── core/          # configuration, state, HTTP server
//! ├── store/         # record store, seed inventory
//! ├── booking/       # booking protocols and views
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging, clock
//! ```

pub mod api;
pub mod booking;
pub mod core;
pub mod store;
pub mod utils;

// Re-export common types
pub use booking::BookingManager;
pub use core::{Config, Server, ServerState};
pub use store::{DeskStore, RedbStore};
pub use utils::{AppError, AppResult};

// Re-export logger setup
pub use utils::logger::init_logger;
