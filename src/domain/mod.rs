// Domain layer: core models and ports (interfaces) for external services.

pub mod model;
pub mod ports;
