// Domain layer: keyword models and the ports (traits) the pipelines depend on.

pub mod model;
pub mod ports;
