pub mod error_status;

pub use error_status::error_status_middleware;
