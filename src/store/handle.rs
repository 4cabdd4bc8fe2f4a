use std::any::Any;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex, RwLock};

use crate::store::action::{init_action, replace_action, FrameworkAction};
use crate::store::middleware::{Middleware, MiddlewareApi};

/// Pure function mapping (current state, action) to the next state.
pub type Reducer<S, A> = Arc<dyn Fn(&S, &A) -> S + Send + Sync>;

/// The function behind a store's public dispatch slot. Returns the action,
/// like Redux's `dispatch`.
pub type DispatchFn<A> = Arc<dyn Fn(A) -> A + Send + Sync>;

pub type SharedMiddleware<S, A> = Arc<dyn Middleware<S, A>>;

/// Bounds every store state satisfies. `Clone` is the deep copy used for
/// snapshots.
pub trait StoreState: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> StoreState for T {}

pub trait Dispatcher<A> {
    fn dispatch(&self, action: A) -> A;
}

pub trait StateSource<S> {
    fn get_state(&self) -> S;
}

pub trait Reconfigurable<S, A> {
    fn replace_reducer(&self, reducer: Reducer<S, A>);
}

/// Cloneable handle to a store.
///
/// Public dispatch goes through a replaceable slot (see [`Store::set_dispatch_fn`]).
/// The slot initially points at the inner dispatch: middleware chain, then
/// reducer, then any actions the middleware queued.
///
/// Dispatches are serialized per store: a whole slot call, including any
/// wrapper reading `get_state` afterwards, runs before the next one starts.
pub struct Store<S, A> {
    inner: Arc<StoreInner<S, A>>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S, A> std::fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("middleware", &self.inner.middleware.len())
            .field("extensions", &self.inner.extensions.read().len())
            .finish_non_exhaustive()
    }
}

/// Non-owning store reference, held by recorders and interception wrappers.
pub struct WeakStore<S, A> {
    inner: Weak<StoreInner<S, A>>,
}

impl<S, A> Clone for WeakStore<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S, A> WeakStore<S, A> {
    pub fn upgrade(&self) -> Option<Store<S, A>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

struct StoreInner<S, A> {
    state: RwLock<S>,
    reducer: RwLock<Reducer<S, A>>,
    dispatch: RwLock<DispatchFn<A>>,
    /// Held across a public dispatch or a reducer swap.
    serial: ReentrantMutex<()>,
    middleware: Vec<SharedMiddleware<S, A>>,
    queue: Mutex<VecDeque<A>>,
    extensions: RwLock<HashMap<&'static str, Arc<dyn Any + Send + Sync>>>,
}

impl<S, A> Store<S, A>
where
    S: StoreState,
    A: FrameworkAction,
{
    pub fn new<R>(reducer: R, preloaded_state: S) -> Self
    where
        R: Fn(&S, &A) -> S + Send + Sync + 'static,
    {
        Self::create(Arc::new(reducer), preloaded_state, Vec::new())
    }

    pub fn with_middleware<R>(
        reducer: R,
        preloaded_state: S,
        middleware: Vec<SharedMiddleware<S, A>>,
    ) -> Self
    where
        R: Fn(&S, &A) -> S + Send + Sync + 'static,
    {
        Self::create(Arc::new(reducer), preloaded_state, middleware)
    }

    /// Build a store and run the reducer once with an `@@redux/INIT…` action.
    pub fn create(
        reducer: Reducer<S, A>,
        preloaded_state: S,
        middleware: Vec<SharedMiddleware<S, A>>,
    ) -> Self {
        let inner = Arc::new_cyclic(|weak: &Weak<StoreInner<S, A>>| {
            let weak = weak.clone();
            let inner_dispatch: DispatchFn<A> = Arc::new(move |action: A| match weak.upgrade() {
                Some(inner) => inner.dispatch_inner(action),
                None => action,
            });
            StoreInner {
                state: RwLock::new(preloaded_state),
                reducer: RwLock::new(reducer),
                dispatch: RwLock::new(inner_dispatch),
                serial: ReentrantMutex::new(()),
                middleware,
                queue: Mutex::new(VecDeque::new()),
                extensions: RwLock::new(HashMap::new()),
            }
        });
        inner.reduce(&init_action());
        Self { inner }
    }

    /// Dispatch through the public slot.
    pub fn dispatch(&self, action: A) -> A {
        let _serial = self.inner.serial.lock();
        let dispatch = self.dispatch_fn();
        dispatch(action)
    }

    pub fn get_state(&self) -> S {
        self.inner.state.read().clone()
    }

    /// Swap the reducer, then run it once with an `@@redux/REPLACE…` action.
    pub fn replace_reducer(&self, reducer: Reducer<S, A>) {
        let _serial = self.inner.serial.lock();
        *self.inner.reducer.write() = reducer;
        self.inner.reduce(&replace_action());
    }

    pub fn reducer(&self) -> Reducer<S, A> {
        self.inner.reducer.read().clone()
    }
}

impl<S, A> Store<S, A> {
    /// The function currently installed in the dispatch slot.
    pub fn dispatch_fn(&self) -> DispatchFn<A> {
        self.inner.dispatch.read().clone()
    }

    pub fn set_dispatch_fn(&self, dispatch: DispatchFn<A>) {
        *self.inner.dispatch.write() = dispatch;
    }

    pub fn downgrade(&self) -> WeakStore<S, A> {
        WeakStore {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Attach a value under a well-known name. Replaces any previous value.
    pub fn insert_extension<T>(&self, name: &'static str, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.inner.extensions.write().insert(name, Arc::new(value));
    }

    /// Fetch a copy of the value stored under `name`, if it has type `T`.
    pub fn extension<T>(&self, name: &str) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.inner
            .extensions
            .read()
            .get(name)
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    /// Whether both handles point at the same store.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S, A> StoreInner<S, A>
where
    S: StoreState,
    A: FrameworkAction,
{
    fn dispatch_inner(&self, action: A) -> A {
        let mut should_reduce = true;

        if !self.middleware.is_empty() {
            let state = self.state.read().clone();
            let api = MiddlewareApi::new(&self.queue);
            for middleware in &self.middleware {
                if !middleware.handle(&action, &state, &api) {
                    should_reduce = false;
                    break;
                }
            }
        }

        if should_reduce {
            self.reduce(&action);
        }

        // Process any actions dispatched by middleware
        loop {
            let next = self.queue.lock().pop_front();
            match next {
                Some(queued) => {
                    self.dispatch_inner(queued);
                }
                None => break,
            }
        }

        action
    }

    fn reduce(&self, action: &A) {
        let reducer = self.reducer.read().clone();
        let current = self.state.read().clone();
        let next = reducer(&current, action);
        *self.state.write() = next;
    }
}

impl<S, A> Dispatcher<A> for Store<S, A>
where
    S: StoreState,
    A: FrameworkAction,
{
    fn dispatch(&self, action: A) -> A {
        Store::dispatch(self, action)
    }
}

impl<S, A> StateSource<S> for Store<S, A>
where
    S: StoreState,
    A: FrameworkAction,
{
    fn get_state(&self) -> S {
        Store::get_state(self)
    }
}

impl<S, A> Reconfigurable<S, A> for Store<S, A>
where
    S: StoreState,
    A: FrameworkAction,
{
    fn replace_reducer(&self, reducer: Reducer<S, A>) {
        Store::replace_reducer(self, reducer)
    }
}
