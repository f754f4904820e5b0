// Domain layer: planet model and the ports the retriever and the HTTP layer depend on.

pub mod model;
pub mod ports;
