//! Token Radar HTTP API
//! REST surface over the evaluator: health, stats and pair evaluation

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use handlers::AppState;
pub use routes::create_router;
pub use types::*;
