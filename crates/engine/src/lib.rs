//! Doorwright Engine library.
//!
//! Interactive, step-by-step creation of movable structures.
//!
//! ## Structure
//!
//! - `use_cases/` - Step procedures, the creator flow and the session registry
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Test fixtures module for unit testing.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
