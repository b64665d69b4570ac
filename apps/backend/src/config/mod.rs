pub mod runtime;
pub mod store;

pub use runtime::RuntimeEnv;
pub use store::StoreConfig;
