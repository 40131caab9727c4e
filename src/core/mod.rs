pub mod services;
pub mod snapshot;
