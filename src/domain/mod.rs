// Domain layer: view models and the ports the aggregator and web layer depend on.

pub mod model;
pub mod ports;
