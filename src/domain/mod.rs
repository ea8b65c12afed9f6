// Domain layer: scheduling models and ports. No external dependencies beyond serde.

pub mod model;
pub mod ports;
pub mod schedule;
