// Domain layer: signs, content records, and the ports the core talks through.

pub mod catalog;
pub mod model;
pub mod ports;
pub mod system;
