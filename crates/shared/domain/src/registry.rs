//! Slice registry for modular features.
//! A minimal type-erased container for pre-initialized feature state, so the
//! server can hold every enabled slice behind one map.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// Marker trait for feature state that can be shared across threads.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    /// Helper to allow downcasting from the trait object.
    fn as_any(&self) -> &dyn Any;
}

/// A container for an initialized feature.
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    /// Human-readable slice name for startup diagnostics.
    pub name: &'static str,
    pub state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    /// Create a new initialized slice from a concrete state.
    pub fn new<T: FeatureSlice>(name: &'static str, state: T) -> Self {
        Self { id: TypeId::of::<T>(), name, state: Box::new(state) }
    }
}
