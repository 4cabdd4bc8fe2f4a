use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::config::SnoopConfig;
use crate::error::{Result, SnoopError};
use crate::recording::matching::{ActionFilter, ActionTypes};
use crate::recording::record::Record;
use crate::recording::waiter::{WaitForAction, Waiter};
use crate::store::{DispatchFn, FrameworkAction, Reducer, Store, StoreState, WeakStore};

/// Extension name under which injected stores carry their recorder.
pub const SNOOP_EXTENSION: &str = "snoop";

/// Records every action dispatched to a store together with the state right
/// after it, and lets tests await specific actions.
///
/// Cloning gives another handle to the same history.
pub struct Recorder<S, A> {
    inner: Arc<Mutex<RecorderState<S, A>>>,
}

impl<S, A> Clone for Recorder<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S, A> std::fmt::Debug for Recorder<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("Recorder")
            .field("attachment", &state.attachment.label())
            .field("records", &state.history.len())
            .field("waiters", &state.waiters.len())
            .finish()
    }
}

enum Attachment<S, A> {
    Unattached,
    /// The store's dispatch slot holds `installed`, which wraps `original`.
    Dispatch {
        store: WeakStore<S, A>,
        original: DispatchFn<A>,
        installed: DispatchFn<A>,
    },
    /// The store's reducer slot holds `installed`, which wraps `original`
    /// (injected stores).
    Reducer {
        store: WeakStore<S, A>,
        original: Reducer<S, A>,
        installed: Reducer<S, A>,
    },
    Detached,
}

impl<S, A> Attachment<S, A> {
    fn label(&self) -> &'static str {
        match self {
            Attachment::Unattached => "unattached",
            Attachment::Dispatch { .. } => "dispatch",
            Attachment::Reducer { .. } => "reducer",
            Attachment::Detached => "detached",
        }
    }

    fn store(&self) -> Option<&WeakStore<S, A>> {
        match self {
            Attachment::Dispatch { store, .. } | Attachment::Reducer { store, .. } => Some(store),
            Attachment::Unattached | Attachment::Detached => None,
        }
    }
}

struct RecorderState<S, A> {
    attachment: Attachment<S, A>,
    history: Vec<Record<S, A>>,
    waiters: Vec<Waiter<S, A>>,
    filter: ActionFilter,
    log_records: bool,
}

impl<S, A> RecorderState<S, A> {
    fn ensure_attachable(&self) -> Result<()> {
        match self.attachment {
            Attachment::Unattached => Ok(()),
            Attachment::Detached => Err(SnoopError::Detached),
            Attachment::Dispatch { .. } | Attachment::Reducer { .. } => {
                Err(SnoopError::AlreadyAttached)
            }
        }
    }
}

impl<S, A> Recorder<S, A>
where
    S: StoreState,
    A: FrameworkAction,
{
    /// An empty, unattached recorder.
    pub fn new() -> Self {
        Self::with_config(&SnoopConfig::default())
    }

    pub fn with_config(config: &SnoopConfig) -> Self {
        let filter = config
            .ignore_prefixes
            .iter()
            .fold(ActionFilter::default(), |filter, prefix| {
                filter.with_prefix(prefix.as_str())
            });
        Self {
            inner: Arc::new(Mutex::new(RecorderState {
                attachment: Attachment::Unattached,
                history: Vec::new(),
                waiters: Vec::new(),
                filter,
                log_records: config.log_records,
            })),
        }
    }

    /// A recorder already attached to `store`.
    pub fn with_store(store: &Store<S, A>) -> Self {
        let recorder = Self::new();
        let attachment = recorder.intercept_dispatch(store);
        recorder.inner.lock().attachment = attachment;
        recorder
    }

    /// The recorder an injected store carries, if any.
    pub fn of(store: &Store<S, A>) -> Option<Self> {
        store.extension::<Self>(SNOOP_EXTENSION)
    }

    /// Wrap `store`'s dispatch slot so every dispatch is recorded.
    ///
    /// The wrapper runs the original dispatch, snapshots the resulting state,
    /// records it and returns the original dispatch's result.
    pub fn attach(&self, store: &Store<S, A>) -> Result<()> {
        let mut state = self.inner.lock();
        state.ensure_attachable()?;
        state.attachment = self.intercept_dispatch(store);
        Ok(())
    }

    /// Install the recording wrapper in `store`'s dispatch slot. Must not
    /// lock `self.inner`.
    fn intercept_dispatch(&self, store: &Store<S, A>) -> Attachment<S, A> {
        let original = store.dispatch_fn();
        let passthrough = original.clone();
        let recorder = Arc::downgrade(&self.inner);
        let source = store.downgrade();
        let installed: DispatchFn<A> = Arc::new(move |action: A| {
            let result = passthrough(action.clone());
            if let (Some(inner), Some(store)) = (recorder.upgrade(), source.upgrade()) {
                Recorder { inner }.push(action, store.get_state());
            }
            result
        });
        store.set_dispatch_fn(installed.clone());
        tracing::debug!("recorder attached to store dispatch");

        Attachment::Dispatch {
            store: store.downgrade(),
            original,
            installed,
        }
    }

    /// Bind to `store` and record from a wrapper around its current reducer,
    /// installed with `replace_reducer`. The dispatch slot is left alone so
    /// each reducer run is recorded exactly once.
    pub(crate) fn observe_reducer(store: &Store<S, A>, config: &SnoopConfig) -> Self {
        let recorder = Self::with_config(config);
        let original = store.reducer();
        let wrapped = original.clone();

        let weak: Weak<Mutex<RecorderState<S, A>>> = Arc::downgrade(&recorder.inner);
        let installed: Reducer<S, A> = Arc::new(move |state: &S, action: &A| {
            let next = wrapped(state, action);
            if let Some(inner) = weak.upgrade() {
                Recorder { inner }.record(action.clone(), &next);
            }
            next
        });
        recorder.inner.lock().attachment = Attachment::Reducer {
            store: store.downgrade(),
            original,
            installed: installed.clone(),
        };
        store.replace_reducer(installed);
        tracing::debug!("recorder observing store reducer");
        recorder
    }

    /// Append a record unless the action is filtered, then re-check waiters
    /// in registration order. `state` is copied.
    ///
    /// Ignored once the recorder has been detached.
    pub fn record(&self, action: A, state: &S) {
        self.push(action, state.clone());
    }

    fn push(&self, action: A, state: S) {
        let mut inner = self.inner.lock();
        if matches!(inner.attachment, Attachment::Detached) {
            tracing::trace!(action_type = ?action.action_type(), "recorder detached, not recording");
            return;
        }
        if inner.filter.is_ignored(action.action_type()) {
            tracing::debug!(action_type = ?action.action_type(), "ignoring framework action");
            return;
        }

        if inner.log_records {
            tracing::info!(
                action_type = ?action.action_type(),
                index = inner.history.len(),
                "recorded action"
            );
        } else {
            tracing::debug!(
                action_type = ?action.action_type(),
                index = inner.history.len(),
                "recorded action"
            );
        }
        inner.history.push(Record { action, state });

        let locked = &mut *inner;
        let pending = std::mem::take(&mut locked.waiters);
        locked.waiters = pending
            .into_iter()
            .filter_map(|waiter| waiter.check(&locked.history))
            .collect();
    }

    /// Copy of the full history, in dispatch order.
    pub fn history(&self) -> Vec<Record<S, A>> {
        self.inner.lock().history.clone()
    }

    /// Last recorded entry.
    pub fn last(&self) -> Option<Record<S, A>> {
        self.inner.lock().history.last().cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().history.is_empty()
    }

    /// Clear history. Attachment and pending waiters are untouched.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        tracing::debug!(cleared = inner.history.len(), "recorder reset");
        inner.history.clear();
    }

    pub fn store(&self) -> Option<Store<S, A>> {
        self.inner
            .lock()
            .attachment
            .store()
            .and_then(WeakStore::upgrade)
    }

    pub fn is_attached(&self) -> bool {
        self.inner.lock().attachment.store().is_some()
    }

    /// Wait for the `skip`-th (0-based) record whose type is in `types`,
    /// counting records already in history.
    pub fn wait_for_action(
        &self,
        types: impl Into<ActionTypes>,
        skip: usize,
    ) -> WaitForAction<S, A> {
        let types = types.into();
        tracing::trace!(types = %types, skip, "waiting for action");
        let mut inner = self.inner.lock();
        let (future, parked) = Waiter::resolve_or_park(&inner.history, types, skip);
        if let Some(waiter) = parked {
            inner.waiters.push(waiter);
        }
        future
    }

    /// Restore the store's original dispatch (or reducer) and release the
    /// store. The recorder cannot be attached again afterwards.
    ///
    /// The slot is only restored while it still holds this recorder's
    /// wrapper. If something replaced it since, it is left alone and the
    /// wrapper, wherever it still runs, stops recording.
    pub fn detach(&self) -> Result<()> {
        let previous = {
            let mut inner = self.inner.lock();
            match inner.attachment {
                Attachment::Unattached => return Err(SnoopError::NotAttached),
                Attachment::Detached => return Err(SnoopError::Detached),
                _ => std::mem::replace(&mut inner.attachment, Attachment::Detached),
            }
        };

        match previous {
            Attachment::Dispatch {
                store,
                original,
                installed,
            } => {
                if let Some(store) = store.upgrade() {
                    if Arc::ptr_eq(&store.dispatch_fn(), &installed) {
                        store.set_dispatch_fn(original);
                    } else {
                        tracing::debug!("dispatch slot was replaced, leaving it in place");
                    }
                }
            }
            Attachment::Reducer {
                store,
                original,
                installed,
            } => {
                if let Some(store) = store.upgrade() {
                    if Arc::ptr_eq(&store.reducer(), &installed) {
                        store.replace_reducer(original);
                    } else {
                        tracing::debug!("reducer was replaced, leaving it in place");
                    }
                }
            }
            Attachment::Unattached | Attachment::Detached => {}
        }
        tracing::debug!("recorder detached");
        Ok(())
    }
}

impl<S, A> Default for Recorder<S, A>
where
    S: StoreState,
    A: FrameworkAction,
{
    fn default() -> Self {
        Self::new()
    }
}
