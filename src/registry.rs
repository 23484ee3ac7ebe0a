use alloc::{boxed::Box, collections::BTreeMap};
use core::any::{Any, TypeId};
use tracing::{debug, debug_span, error, warn};

use crate::{
    any::TypeInfo,
    errors::{InstantiateErrorKind, RegistryErrorKind, ResolveErrorKind},
    introspect::Introspect,
    resolver::InjectionPlan,
};

type BoxedProvider = Box<dyn Fn(&Registry) -> Result<Box<dyn Any>, ResolveErrorKind>>;

/// Type-keyed store of zero-argument providers.
///
/// Registration goes through `&mut self`, lookup through `&self`: the
/// configure-then-freeze discipline is enforced by the borrow checker, so
/// the backing map needs no internal synchronization.
///
/// Each provider runs freshly on every [`Registry::lookup`]; instance
/// bindings install a constant-returning closure over the captured value.
/// Entries are never updated or removed after a successful registration.
#[derive(Default)]
pub struct Registry {
    providers: BTreeMap<TypeId, BoxedProvider>,
}

impl Registry {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            providers: BTreeMap::new(),
        }
    }

    /// Binds `T` to a provider that clones the captured instance on every
    /// lookup. Register an `Arc<T>` to share one instance by identity.
    pub fn register_instance<T>(&mut self, instance: T) -> Result<(), RegistryErrorKind>
    where
        T: Clone + 'static,
    {
        self.register_provider(move || Ok(instance.clone()))
    }

    /// Binds `T` to the given provider, invoked freshly on every lookup.
    /// Provider failures propagate unchanged to the caller of `lookup`.
    pub fn register_provider<T, P>(&mut self, provider: P) -> Result<(), RegistryErrorKind>
    where
        T: 'static,
        P: Fn() -> Result<T, InstantiateErrorKind> + 'static,
    {
        self.bind(
            TypeInfo::of::<T>(),
            Box::new(move |_registry| match provider() {
                Ok(instance) => Ok(Box::new(instance) as Box<dyn Any>),
                Err(err) => {
                    error!("{}", err);
                    Err(ResolveErrorKind::Factory(err))
                }
            }),
        )
    }

    /// Binds `T` to a provider derived from the injection metadata of
    /// `Impl`: constructor parameters and injection-marked properties are
    /// resolved through recursive lookups on this registry.
    ///
    /// The metadata is discovered here, once; constructor-selection errors
    /// surface at registration time and leave the registry untouched.
    /// `T: From<Impl>` ties the binding to the bound type (identity when
    /// registering a type under itself).
    ///
    /// No cycle detection is performed: a type that transitively depends on
    /// itself causes unbounded recursive lookups.
    pub fn register_provider_class<T, Impl>(&mut self) -> Result<(), RegistryErrorKind>
    where
        T: From<Impl> + 'static,
        Impl: Introspect,
    {
        let plan = InjectionPlan::discover::<Impl>()?;
        self.bind(
            TypeInfo::of::<T>(),
            Box::new(move |registry| {
                let instance: Impl = plan.execute(registry)?;
                Ok(Box::new(T::from(instance)) as Box<dyn Any>)
            }),
        )
    }

    /// Invokes the provider bound to `T` and returns its result.
    pub fn lookup<T: 'static>(&self) -> Result<T, ResolveErrorKind> {
        let type_info = TypeInfo::of::<T>();
        match self.lookup_erased(type_info)?.downcast::<T>() {
            Ok(instance) => Ok(*instance),
            Err(incorrect_type) => {
                let err = ResolveErrorKind::IncorrectType {
                    expected: type_info,
                    actual: (*incorrect_type).type_id(),
                };
                error!("{}", err);
                Err(err)
            }
        }
    }

    pub(crate) fn lookup_erased(&self, type_info: TypeInfo) -> Result<Box<dyn Any>, ResolveErrorKind> {
        let span = debug_span!("lookup", dependency = type_info.short_name());
        let _guard = span.enter();

        let Some(provide) = self.providers.get(&type_info.id) else {
            let err = ResolveErrorKind::NoProvider { type_info };
            warn!("{}", err);
            return Err(err);
        };

        let instance = provide(self)?;
        debug!("Resolved");
        Ok(instance)
    }

    fn bind(&mut self, type_info: TypeInfo, provide: BoxedProvider) -> Result<(), RegistryErrorKind> {
        if self.providers.contains_key(&type_info.id) {
            let err = RegistryErrorKind::DuplicateRegistration { type_info };
            warn!("{}", err);
            return Err(err);
        }

        self.providers.insert(type_info.id, provide);
        debug!(dependency = type_info.short_name(), "Provider registered");
        Ok(())
    }
}
