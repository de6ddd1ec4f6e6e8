//! API layer - HTTP endpoints and middleware

pub mod health;
pub mod middleware;
pub mod router;
pub mod sentiment;
pub mod state;
pub mod types;

pub use router::{create_app_router, create_router};
pub use state::{AppState, ServiceInfo, SentimentServiceTrait};
