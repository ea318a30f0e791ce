mod handlers;
mod routes;
mod state;
pub mod views;

pub use routes::create_router;
pub use state::AppState;
