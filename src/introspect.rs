use alloc::{boxed::Box, vec, vec::Vec};
use core::any::{type_name, Any};

use crate::{any::TypeInfo, errors::AccessErrorKind, value::Value};

/// Reads one property of an erased instance as a [`Value`] borrowed from it.
pub type Getter = for<'a> fn(&'a dyn Any) -> Result<Value<'a>, AccessErrorKind>;

/// Writes one property of an erased instance from an erased value.
pub type Setter = fn(&mut dyn Any, Box<dyn Any>) -> Result<(), AccessErrorKind>;

/// Builds an erased instance from resolved constructor arguments.
pub type Construct = fn(Arguments) -> Result<Box<dyn Any>, AccessErrorKind>;

/// Descriptor of one named property: declared type, optional accessors and
/// the declarative markers that annotations carry in reflection-based
/// frameworks. Descriptors are supplied explicitly by [`Introspect`]
/// implementations instead of being discovered at runtime.
#[derive(Clone, Copy)]
pub struct Property {
    pub name: &'static str,
    pub type_info: TypeInfo,
    /// Overrides `name` in serialized output when present.
    pub rename: Option<&'static str>,
    pub getter: Option<Getter>,
    pub setter: Option<Setter>,
    /// Marks the setter as an injection target.
    pub inject: bool,
}

impl Property {
    #[inline]
    #[must_use]
    pub fn new<T: 'static>(name: &'static str) -> Self {
        Self {
            name,
            type_info: TypeInfo::of::<T>(),
            rename: None,
            getter: None,
            setter: None,
            inject: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn readable<T: 'static>(name: &'static str, getter: Getter) -> Self {
        Self {
            getter: Some(getter),
            ..Self::new::<T>(name)
        }
    }

    #[inline]
    #[must_use]
    pub fn writable<T: 'static>(name: &'static str, setter: Setter) -> Self {
        Self {
            setter: Some(setter),
            ..Self::new::<T>(name)
        }
    }

    #[inline]
    #[must_use]
    pub fn read_write<T: 'static>(name: &'static str, getter: Getter, setter: Setter) -> Self {
        Self {
            getter: Some(getter),
            setter: Some(setter),
            ..Self::new::<T>(name)
        }
    }

    #[inline]
    #[must_use]
    pub fn rename(mut self, name: &'static str) -> Self {
        self.rename = Some(name);
        self
    }

    /// Marks the property's setter as injectable.
    #[inline]
    #[must_use]
    pub fn inject(mut self) -> Self {
        self.inject = true;
        self
    }
}

/// Descriptor of one public constructor: ordered parameter types, the
/// injection marker and the erased construction fn.
#[derive(Clone)]
pub struct Constructor {
    pub parameters: Vec<TypeInfo>,
    pub inject: bool,
    pub construct: Construct,
}

impl Constructor {
    #[inline]
    #[must_use]
    pub fn new(construct: Construct) -> Self {
        Self {
            parameters: vec![],
            inject: false,
            construct,
        }
    }

    /// Appends a parameter. Declaration order must match the order in which
    /// the construct fn takes them out of [`Arguments`].
    #[inline]
    #[must_use]
    pub fn parameter<T: 'static>(mut self) -> Self {
        self.parameters.push(TypeInfo::of::<T>());
        self
    }

    /// Marks the constructor for injection.
    #[inline]
    #[must_use]
    pub fn inject(mut self) -> Self {
        self.inject = true;
        self
    }
}

/// Ordered cursor over the resolved constructor arguments, consumed by a
/// construct fn via typed [`Arguments::take`] calls.
pub struct Arguments {
    values: vec::IntoIter<Box<dyn Any>>,
}

impl Arguments {
    #[inline]
    #[must_use]
    pub(crate) fn new(values: Vec<Box<dyn Any>>) -> Self {
        Self {
            values: values.into_iter(),
        }
    }

    pub fn take<T: 'static>(&mut self) -> Result<T, AccessErrorKind> {
        let Some(value) = self.values.next() else {
            return Err(AccessErrorKind::MissingArgument {
                expected: type_name::<T>(),
            });
        };
        match value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => Err(AccessErrorKind::ValueTypeMismatch {
                expected: type_name::<T>(),
            }),
        }
    }
}

/// Static side of the introspection contract: a type declares its property
/// descriptors and public constructors. Both defaults are empty, so a type
/// with no injectable state only overrides what it needs.
pub trait Introspect: Sized + 'static {
    #[must_use]
    fn properties() -> Vec<Property> {
        vec![]
    }

    #[must_use]
    fn constructors() -> Vec<Constructor> {
        vec![]
    }
}

/// Object side of the introspection contract, blanket-implemented for every
/// [`Introspect`] type. This is what the serializer dispatches on when it
/// walks a nested value of a type it only knows at runtime.
pub trait Reflect: Any {
    #[must_use]
    fn type_info(&self) -> TypeInfo;

    #[must_use]
    fn properties(&self) -> Vec<Property>;

    #[must_use]
    fn as_any(&self) -> &dyn Any;
}

impl<T: Introspect> Reflect for T {
    #[inline]
    fn type_info(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    #[inline]
    fn properties(&self) -> Vec<Property> {
        <T as Introspect>::properties()
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Downcasts the erased value passed to a setter.
pub fn setter_value<T: 'static>(value: Box<dyn Any>) -> Result<T, AccessErrorKind> {
    match value.downcast::<T>() {
        Ok(value) => Ok(*value),
        Err(_) => Err(AccessErrorKind::ValueTypeMismatch {
            expected: type_name::<T>(),
        }),
    }
}

/// Downcasts the erased receiver of a getter.
pub fn instance_ref<T: 'static>(instance: &dyn Any) -> Result<&T, AccessErrorKind> {
    instance.downcast_ref::<T>().ok_or(AccessErrorKind::ReceiverTypeMismatch {
        expected: type_name::<T>(),
    })
}

/// Downcasts the erased receiver of a setter.
pub fn instance_mut<T: 'static>(instance: &mut dyn Any) -> Result<&mut T, AccessErrorKind> {
    instance.downcast_mut::<T>().ok_or(AccessErrorKind::ReceiverTypeMismatch {
        expected: type_name::<T>(),
    })
}
