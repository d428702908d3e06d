pub mod config;
mod error;
pub mod handlers;
mod router;
pub mod state;

pub use error::ApiError;
pub use router::create_router;
pub use state::AppState;
