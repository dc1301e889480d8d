use axum::extract::FromRef;
use faucet_domain::config::FaucetConfig;
use faucet_domain::registry::{FeatureSlice, InitializedSlice};
use fxhash::FxHashMap;
use std::any::TypeId;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ApiStateError {
    #[error("State validation error: {message}")]
    Validation { message: Cow<'static, str> },
    #[error("State missing feature slice: {message}")]
    MissingSlice { message: Cow<'static, str> },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: FaucetConfig,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

/// Cheaply cloneable handle to everything the handlers need.
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }

    #[must_use]
    pub fn get_slice<T: FeatureSlice>(&self) -> Option<&T> {
        self.inner
            .slices
            .get(&TypeId::of::<T>())
            .and_then(|initialized| initialized.state.as_any().downcast_ref::<T>())
    }

    /// Returns a reference to the slice if it is registered.
    ///
    /// # Errors
    /// Returns an error if the slice is not registered.
    pub fn try_get_slice<T: FeatureSlice>(&self) -> Result<&T, ApiStateError> {
        self.get_slice::<T>().ok_or_else(|| ApiStateError::MissingSlice {
            message: std::any::type_name::<T>().into(),
        })
    }

    /// Iterates over registered slice names (for startup diagnostics).
    pub fn slice_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inner.slices.values().map(|slice| slice.name)
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for FaucetConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<FaucetConfig>,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: FaucetConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn register_slice(mut self, slice: InitializedSlice) -> Self {
        self.slices.insert(slice.id, slice);
        self
    }

    /// Registers multiple slices at once.
    #[must_use]
    pub fn register_slices<I>(mut self, slices: I) -> Self
    where
        I: IntoIterator<Item = InitializedSlice>,
    {
        for slice in slices {
            self.slices.insert(slice.id, slice);
        }
        self
    }

    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let config = self.config.ok_or_else(|| ApiStateError::Validation {
            message: "FaucetConfig not provided".into(),
        })?;

        Ok(ApiState { inner: Arc::new(ApiStateInner { config, slices: self.slices }) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct DummySlice {
        marker: u8,
    }

    impl FeatureSlice for DummySlice {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    #[test]
    fn build_requires_config() {
        assert!(matches!(
            ApiState::builder().build(),
            Err(ApiStateError::Validation { .. })
        ));
    }

    #[test]
    fn slices_are_retrievable_by_type() {
        let state = ApiState::builder()
            .config(FaucetConfig::default())
            .register_slice(InitializedSlice::new("dummy", DummySlice { marker: 7 }))
            .build()
            .unwrap();

        assert_eq!(state.get_slice::<DummySlice>().unwrap().marker, 7);
        assert_eq!(state.slice_names().collect::<Vec<_>>(), vec!["dummy"]);
    }

    #[test]
    fn missing_slice_is_an_error() {
        let state = ApiState::builder().config(FaucetConfig::default()).build().unwrap();
        assert!(matches!(
            state.try_get_slice::<DummySlice>(),
            Err(ApiStateError::MissingSlice { .. })
        ));
    }
}
