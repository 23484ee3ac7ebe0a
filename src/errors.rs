mod access;
mod instantiate;
mod registry;
mod resolve;

pub use access::AccessErrorKind;
pub use instantiate::InstantiateErrorKind;
pub use registry::RegistryErrorKind;
pub use resolve::ResolveErrorKind;
