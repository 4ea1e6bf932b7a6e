//! Use cases - User story orchestration.
//!
//! `procedure` is the generic step machinery, `creator` drives one player
//! through structure creation on top of it and `session` keeps track of the
//! creators that are currently running.

pub mod creator;
pub mod procedure;
pub mod session;

pub use creator::{ClaimToken, Creator, CreatorPorts, CreatorStatus, NameClaims};
pub use procedure::{InputKind, ProcedureError, StepInput};
pub use session::{CreatorSessions, SessionError};
