// Domain layer: records, image options and the ports adapters implement.

pub mod image;
pub mod model;
pub mod ports;
