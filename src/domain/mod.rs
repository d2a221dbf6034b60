// Domain layer: plain models, form types and ports. No runtime dependencies beyond serde.

pub mod forms;
pub mod model;
pub mod ports;
