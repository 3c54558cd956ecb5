//! Session management.
//!
//! The session is a three-state machine held by a [`SessionStore`]. The
//! [`SessionManager`] drives it through status checks, login, logout, and the
//! OAuth callback; the [`SessionEnforcer`] forces it to the unauthenticated
//! state whenever the backend rejects a request.

mod enforcer;
mod manager;
mod state;
mod store;

pub use enforcer::SessionEnforcer;
pub use manager::{CallbackPolicy, SessionManager};
pub use state::SessionState;
pub use store::SessionStore;
