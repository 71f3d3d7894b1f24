//! API middleware components

pub mod events;
pub mod logging;
pub mod panic;

pub use events::api_call_middleware;
pub use logging::logging_middleware;
pub use panic::panic_response;
