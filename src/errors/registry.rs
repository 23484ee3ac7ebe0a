use crate::any::TypeInfo;

/// Registration-time failures. A failed registration never mutates the
/// registry: the previously bound provider, if any, stays intact.
#[derive(thiserror::Error, Debug)]
pub enum RegistryErrorKind {
    #[error("Type {} is already bound in registry", type_info.name)]
    DuplicateRegistration { type_info: TypeInfo },
    #[error("Type {} has {count} injection-marked constructors, expected at most one", type_info.name)]
    AmbiguousConstructor { type_info: TypeInfo, count: usize },
    #[error("Type {} has no injection-marked constructor and no zero-argument constructor", type_info.name)]
    NoDefaultConstructor { type_info: TypeInfo },
}
