// Domain layer: course model, normalization rules, ordering policies and the
// ports the pipeline talks to. No I/O happens here.

pub mod model;
pub mod ports;
pub mod services;
