//! Middleware for resolving the acting account.

mod session;

pub use session::{hq_middleware, session_middleware, CurrentAccount};
