//! HTTP handlers grouped by resource.

mod account_handler;
mod delete_request_handler;
mod health_handler;
mod resource_handler;
mod session_handler;

pub use account_handler::account_routes;
pub use delete_request_handler::delete_request_routes;
pub use health_handler::health_routes;
pub use resource_handler::resource_routes;
pub use session_handler::session_routes;
