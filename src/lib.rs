#![no_std]

extern crate alloc;

pub(crate) mod any;
pub(crate) mod errors;
pub(crate) mod introspect;
pub(crate) mod registry;
pub(crate) mod resolver;
pub(crate) mod serializer;
pub(crate) mod value;

pub use any::TypeInfo;
pub use errors::{AccessErrorKind, InstantiateErrorKind, RegistryErrorKind, ResolveErrorKind};
pub use introspect::{
    instance_mut, instance_ref, setter_value, Arguments, Construct, Constructor, Getter, Introspect, Property, Reflect, Setter,
};
pub use registry::Registry;
pub use serializer::TextSerializer;
pub use value::Value;
