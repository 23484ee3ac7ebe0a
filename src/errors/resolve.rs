use core::any::TypeId;

use super::{access::AccessErrorKind, instantiate::InstantiateErrorKind};
use crate::any::TypeInfo;

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("Provider not found in registry for type {}", type_info.name)]
    NoProvider { type_info: TypeInfo },
    #[error("Incorrect provider result type. Actual: {actual:?}, expected: {expected:?}")]
    IncorrectType { expected: TypeInfo, actual: TypeId },
    #[error(transparent)]
    Factory(InstantiateErrorKind),
    #[error(transparent)]
    Access(AccessErrorKind),
}
