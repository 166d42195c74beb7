pub mod bootstrapper;
pub mod configuration_store;
pub mod object_registry;
pub mod service;

pub use bootstrapper::{nil_init, InitFn, ServiceBootstrapper};
pub use configuration_store::ConfigurationStore;
pub use object_registry::{ObjectKey, ObjectRegistry};
pub use service::{new_service, Service};
