// Domain layer: the addressee record and the adapter capability ports.

pub mod model;
pub mod ports;
