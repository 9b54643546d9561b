// Domain layer: question records, the usage map and the ports the core talks through.

pub mod model;
pub mod ports;
