/// Failures raised by the accessor fn pointers of a [`crate::Property`] or
/// [`crate::Constructor`]: the introspection analogue of a reflective
/// invocation error. The registry and the serializer propagate these
/// unchanged, they never recover from them.
#[derive(thiserror::Error, Debug)]
pub enum AccessErrorKind {
    #[error("Receiver type mismatch. Expected {expected}")]
    ReceiverTypeMismatch { expected: &'static str },
    #[error("Value type mismatch. Expected {expected}")]
    ValueTypeMismatch { expected: &'static str },
    #[error("Constructor arguments exhausted. Expected {expected}")]
    MissingArgument { expected: &'static str },
}
