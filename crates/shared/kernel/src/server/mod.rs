//! Shared server-side building blocks: API state and system routes.

mod health;
pub mod router;
mod state;

pub use state::{ApiState, ApiStateBuilder, ApiStateError};
