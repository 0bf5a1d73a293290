// Domain layer: records mirrored from the store API and the ports the adapters implement.

pub mod card;
pub mod model;
pub mod ports;
