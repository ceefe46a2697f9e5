//! Process-wide table from element type to its [`Strategy`].
//!
//! Built-in element types are registered on first use. Downstream element
//! types implement [`Element`] and call [`StrategyRegistry::register`] once
//! before any column of that type is created.

use std::any::{Any, TypeId, type_name};
use std::sync::{OnceLock, PoisonError, RwLock};

use numcol_result::{Error, Result};
use numcol_types::{Element, numcol_for_each_element, unimplemented_operations};
use rustc_hash::FxHashMap;

use crate::strategy::Strategy;

type Entry = &'static (dyn Any + Send + Sync);

/// Lookup table keyed by element [`TypeId`].
///
/// Strategies are allocated once and live for the rest of the process, so
/// [`StrategyRegistry::resolve`] hands out `&'static` references that columns
/// cache for their whole lifetime.
pub struct StrategyRegistry {
    entries: RwLock<FxHashMap<TypeId, Entry>>,
}

static GLOBAL: OnceLock<StrategyRegistry> = OnceLock::new();

impl StrategyRegistry {
    fn with_builtins() -> Self {
        let registry = Self {
            entries: RwLock::new(FxHashMap::default()),
        };
        macro_rules! register_builtin {
            ($ty:ty) => {
                registry.insert::<$ty>();
            };
        }
        numcol_for_each_element!(register_builtin);
        registry
    }

    fn global() -> &'static StrategyRegistry {
        GLOBAL.get_or_init(Self::with_builtins)
    }

    /// Register the strategy for `T`.
    ///
    /// Returns `Ok(false)`, leaving the existing entry in place, when `T` is
    /// already registered. Fails with [`Error::InvalidArgumentError`] when `T`
    /// advertises a capability without overriding every method of it; such a
    /// type stays unregistered.
    pub fn register<T: Element>() -> Result<bool> {
        let missing = unimplemented_operations::<T>();
        if !missing.is_empty() {
            tracing::warn!(
                element = type_name::<T>(),
                ?missing,
                "rejecting element type with unimplemented capabilities"
            );
            return Err(Error::InvalidArgumentError(format!(
                "{} advertises {:?} but does not implement: {}",
                type_name::<T>(),
                T::CAPABILITIES,
                missing.join(", ")
            )));
        }
        Ok(Self::global().insert::<T>())
    }

    /// Look up the strategy for `T`.
    ///
    /// Fails with [`Error::UnregisteredType`] when `T` was never registered.
    pub fn resolve<T: Element>() -> Result<&'static Strategy<T>> {
        Self::global().get::<T>()
    }

    pub fn is_registered<T: Element>() -> bool {
        Self::global()
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<T>())
    }

    fn insert<T: Element>(&self) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let key = TypeId::of::<T>();
        if entries.contains_key(&key) {
            tracing::warn!(
                element = type_name::<T>(),
                "ignoring duplicate strategy registration"
            );
            return false;
        }
        let strategy: &'static Strategy<T> = Box::leak(Box::new(Strategy::new()));
        entries.insert(key, strategy);
        tracing::debug!(
            element = type_name::<T>(),
            data_type = %T::DATA_TYPE,
            capabilities = ?T::CAPABILITIES,
            "registered element strategy"
        );
        true
    }

    fn get<T: Element>(&self) -> Result<&'static Strategy<T>> {
        let entry = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<T>())
            .copied()
            .ok_or_else(|| Error::UnregisteredType(type_name::<T>().to_string()))?;
        entry.downcast_ref::<Strategy<T>>().ok_or_else(|| {
            Error::Internal(format!(
                "strategy entry for {} has the wrong type",
                type_name::<T>()
            ))
        })
    }
}
