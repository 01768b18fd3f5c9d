pub mod error;
pub mod handlers;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::ApiServer;
pub use state::{AppState, QueryDefaults};
