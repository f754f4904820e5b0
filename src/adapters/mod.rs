// Adapters layer: concrete implementations of the domain ports.

pub mod memory_store;
pub mod swapi;

pub use memory_store::InMemoryPlanetStore;
pub use swapi::SwapiCounter;
