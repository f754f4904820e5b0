pub mod context;
pub mod retriever;
pub mod worker_pool;

pub use crate::domain::model::Planet;
pub use crate::domain::ports::{AppearanceCounter, PlanetFinder, PlanetRepository};
pub use crate::utils::error::Result;
