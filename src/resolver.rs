use alloc::vec::Vec;
use tracing::{debug, error};

use crate::{
    any::TypeInfo,
    errors::{RegistryErrorKind, ResolveErrorKind},
    introspect::{Arguments, Constructor, Introspect, Property},
    registry::Registry,
};

/// Injection metadata of one implementation type: the single resolvable
/// constructor and the injectable properties. Discovered once at
/// registration time, captured by the installed provider and reused on
/// every invocation without re-introspecting.
pub(crate) struct InjectionPlan {
    type_info: TypeInfo,
    constructor: Constructor,
    properties: Vec<Property>,
}

impl InjectionPlan {
    pub(crate) fn discover<Impl: Introspect>() -> Result<Self, RegistryErrorKind> {
        let type_info = TypeInfo::of::<Impl>();
        let constructor = injectable_constructor(Impl::constructors(), type_info)?;
        let properties = injectable_properties(Impl::properties());

        debug!(
            implementation = type_info.name,
            parameters = constructor.parameters.len(),
            properties = properties.len(),
            "Injection plan discovered"
        );

        Ok(Self {
            type_info,
            constructor,
            properties,
        })
    }

    /// Resolves every constructor parameter in declared order, constructs
    /// the instance and injects each injectable property through its setter.
    ///
    /// Each dependency goes through a recursive registry lookup. Depth is
    /// bounded only by the dependency graph: a type that transitively
    /// depends on itself recurses without limit.
    pub(crate) fn execute<Impl: 'static>(&self, registry: &Registry) -> Result<Impl, ResolveErrorKind> {
        let mut values = Vec::with_capacity(self.constructor.parameters.len());
        for parameter in &self.constructor.parameters {
            values.push(registry.lookup_erased(*parameter)?);
        }

        let instance = match (self.constructor.construct)(Arguments::new(values)) {
            Ok(instance) => instance,
            Err(err) => {
                error!("{}", err);
                return Err(ResolveErrorKind::Access(err));
            }
        };
        let mut instance = match instance.downcast::<Impl>() {
            Ok(instance) => instance,
            Err(incorrect_type) => {
                let err = ResolveErrorKind::IncorrectType {
                    expected: self.type_info,
                    actual: (*incorrect_type).type_id(),
                };
                error!("{}", err);
                return Err(err);
            }
        };

        for property in &self.properties {
            let Some(setter) = property.setter else {
                continue;
            };
            let value = registry.lookup_erased(property.type_info)?;
            if let Err(err) = setter(&mut *instance, value) {
                error!("{}", err);
                return Err(ResolveErrorKind::Access(err));
            }
        }

        debug!("Instantiated");

        Ok(*instance)
    }
}

/// Resolves the constructor list to the single injectable constructor:
/// zero marked constructors fall back to the zero-argument one.
fn injectable_constructor(constructors: Vec<Constructor>, type_info: TypeInfo) -> Result<Constructor, RegistryErrorKind> {
    let mut marked: Vec<Constructor> = constructors.iter().filter(|constructor| constructor.inject).cloned().collect();
    match marked.len() {
        0 => constructors
            .into_iter()
            .find(|constructor| constructor.parameters.is_empty())
            .ok_or(RegistryErrorKind::NoDefaultConstructor { type_info }),
        1 => Ok(marked.remove(0)),
        count => Err(RegistryErrorKind::AmbiguousConstructor { type_info, count }),
    }
}

/// Keeps only properties whose setter carries the injection marker.
/// Read-only and unmarked properties are never touched by the resolver.
fn injectable_properties(properties: Vec<Property>) -> Vec<Property> {
    properties
        .into_iter()
        .filter(|property| property.inject && property.setter.is_some())
        .collect()
}
