//! Core types, schedule arithmetic, and service wiring for the Greyhound
//! bin collection integration.

/// Domain models shared by the calculator and the sensor adapters.
pub mod model;
/// Sensor port trait, published snapshot shape, and error type.
pub mod ports;
/// Registry resolving sensor adapters by identifier.
pub mod registry;
/// The pure collection schedule calculator.
pub mod schedule;
/// High-level service facade used by hosts.
pub mod service;

pub use model::*;
pub use ports::*;
pub use registry::*;
pub use schedule::*;
pub use service::*;
