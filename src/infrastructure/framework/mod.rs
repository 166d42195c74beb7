//! Service framework adapters
//!
//! Implementations of the `ServiceFramework` port.

pub mod local;

pub use local::{LocalService, ShutdownHandle};
