pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{InMemoryPlanetStore, SwapiCounter};
pub use config::{AppConfig, CliConfig};
pub use core::{context::Context, retriever::PlanetRetriever};
pub use domain::model::Planet;
pub use utils::error::{Result, StarsError};
