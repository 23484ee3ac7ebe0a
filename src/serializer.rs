use alloc::{collections::BTreeMap, string::String, sync::Arc};
use core::{any::TypeId, fmt::Write as _};
use parking_lot::Mutex;
use tracing::debug;

use crate::{
    errors::AccessErrorKind,
    introspect::{Property, Reflect},
    value::Value,
};

/// Recursive object-to-text serializer driven by property descriptors.
///
/// Output is a single-line structural literal: `{ }` around objects,
/// `": "` after each key, `", "` between entries. Text values are wrapped
/// in double quotes with no escaping of embedded quotes or control
/// characters, so output containing such text is not guaranteed to be
/// syntactically valid.
///
/// Descriptor lists are memoized per runtime type in an instance-owned
/// cache, so repeated serialization of the same shapes never re-walks
/// [`Reflect::properties`].
#[derive(Default)]
pub struct TextSerializer {
    descriptors: Mutex<BTreeMap<TypeId, Arc<[Property]>>>,
}

impl TextSerializer {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            descriptors: Mutex::new(BTreeMap::new()),
        }
    }

    /// Serializes the value. Getter failures propagate unchanged.
    pub fn to_text<'a>(&self, value: impl Into<Value<'a>>) -> Result<String, AccessErrorKind> {
        let mut out = String::new();
        self.write_value(&mut out, value.into())?;
        Ok(out)
    }

    fn write_value(&self, out: &mut String, value: Value<'_>) -> Result<(), AccessErrorKind> {
        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(value) => {
                let _ = write!(out, "{value}");
            }
            Value::Int(value) => {
                let _ = write!(out, "{value}");
            }
            Value::Float(value) => {
                let _ = write!(out, "{value}");
            }
            Value::Text(value) => {
                out.push('"');
                out.push_str(value);
                out.push('"');
            }
            Value::Object(object) => self.write_object(out, object)?,
        }
        Ok(())
    }

    /// Emits `"<name>": <value>` for each readable property in descriptor
    /// order, using the rename override when the getter carries one.
    fn write_object(&self, out: &mut String, object: &dyn Reflect) -> Result<(), AccessErrorKind> {
        let properties = self.descriptors_of(object);

        out.push('{');
        let mut first = true;
        for property in properties.iter() {
            let Some(getter) = property.getter else {
                continue;
            };
            if !first {
                out.push_str(", ");
            }
            first = false;

            let name = property.rename.unwrap_or(property.name);
            let _ = write!(out, "\"{name}\": ");

            let value = getter(object.as_any())?;
            self.write_value(out, value)?;
        }
        out.push('}');
        Ok(())
    }

    /// Returns the memoized descriptor list for the object's runtime type,
    /// computing it on first sight. The lock is released before the caller
    /// recurses into nested objects.
    fn descriptors_of(&self, object: &dyn Reflect) -> Arc<[Property]> {
        let mut descriptors = self.descriptors.lock();
        descriptors
            .entry(object.type_info().id)
            .or_insert_with(|| {
                debug!(dependency = object.type_info().short_name(), "Descriptors computed");
                Arc::from(object.properties())
            })
            .clone()
    }
}
