// HTTP surface: list/get go through the retriever, create/update/delete hit the store directly.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use router::create_router;
pub use state::AppState;
