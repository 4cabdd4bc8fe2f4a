//! Store creation with a recorder pre-attached.
//!
//! [`inject`] decorates a [`CreateStore`] capability. Stores it creates behave
//! exactly like the inner factory's, plus a [`Recorder`] stored under
//! [`SNOOP_EXTENSION`] that observes every reducer run. Reducer observation
//! also catches actions middleware dispatches through the inner dispatch,
//! which a dispatch-slot wrapper never sees.

use crate::config::SnoopConfig;
use crate::recording::{Recorder, SNOOP_EXTENSION};
use crate::store::{FrameworkAction, Reducer, SharedMiddleware, Store, StoreState};

/// Something that can build stores.
pub trait CreateStore<S, A> {
    fn create_store(
        &self,
        reducer: Reducer<S, A>,
        preloaded_state: S,
        middleware: Vec<SharedMiddleware<S, A>>,
    ) -> Store<S, A>;
}

/// The plain store factory.
#[derive(Debug, Clone, Copy, Default)]
pub struct Framework;

impl<S, A> CreateStore<S, A> for Framework
where
    S: StoreState,
    A: FrameworkAction,
{
    fn create_store(
        &self,
        reducer: Reducer<S, A>,
        preloaded_state: S,
        middleware: Vec<SharedMiddleware<S, A>>,
    ) -> Store<S, A> {
        Store::create(reducer, preloaded_state, middleware)
    }
}

/// A store factory whose stores come with a recorder.
#[derive(Debug, Clone, Default)]
pub struct Injected<C> {
    inner: C,
    config: SnoopConfig,
}

pub fn inject<C>(inner: C) -> Injected<C> {
    inject_with_config(inner, SnoopConfig::default())
}

pub fn inject_with_config<C>(inner: C, config: SnoopConfig) -> Injected<C> {
    Injected { inner, config }
}

impl<C> Injected<C> {
    pub fn config(&self) -> &SnoopConfig {
        &self.config
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<S, A, C> CreateStore<S, A> for Injected<C>
where
    S: StoreState,
    A: FrameworkAction,
    C: CreateStore<S, A>,
{
    fn create_store(
        &self,
        reducer: Reducer<S, A>,
        preloaded_state: S,
        middleware: Vec<SharedMiddleware<S, A>>,
    ) -> Store<S, A> {
        let store = self
            .inner
            .create_store(reducer, preloaded_state, middleware);
        let recorder = Recorder::observe_reducer(&store, &self.config);
        store.insert_extension(SNOOP_EXTENSION, recorder);
        tracing::debug!(extension = SNOOP_EXTENSION, "injected recorder into new store");
        store
    }
}
