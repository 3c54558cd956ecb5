//! Routes, navigation, and the route guard.

mod guard;
mod navigator;
mod route;

pub use guard::{GuardOutcome, RouteGuard, evaluate};
#[cfg(any(test, feature = "test-support"))]
pub use navigator::RecordingNavigator;
pub use navigator::{NavigationEvent, Navigator};
pub use route::Route;
