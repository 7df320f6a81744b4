//! The reactive state slot and the dispatch funnel around the reducer.

use std::rc::Rc;

use hippo_host::{DataLoader, NoopDataLoader, NoopRouteNavigator, RouteNavigator};
use leptos::{
    create_rw_signal, logging, store_value, RwSignal, SignalGetUntracked, SignalSet, StoredValue,
};

use crate::model::{initialize_hippo_state, HippoState};
use crate::reducer::{reduce, HippoAction, HippoError};

/// The host services the runtime depends on, bundled for injection.
#[derive(Clone)]
pub struct HippoHostContext {
    data_loader: Rc<dyn DataLoader>,
    route_navigator: Rc<dyn RouteNavigator>,
}

impl HippoHostContext {
    /// Bundles the given service implementations.
    pub fn new(data_loader: Rc<dyn DataLoader>, route_navigator: Rc<dyn RouteNavigator>) -> Self {
        Self {
            data_loader,
            route_navigator,
        }
    }

    /// The backend loader.
    pub fn data_loader(&self) -> Rc<dyn DataLoader> {
        Rc::clone(&self.data_loader)
    }

    /// The URL navigator.
    pub fn route_navigator(&self) -> Rc<dyn RouteNavigator> {
        Rc::clone(&self.route_navigator)
    }
}

impl Default for HippoHostContext {
    fn default() -> Self {
        Self::new(Rc::new(NoopDataLoader), Rc::new(NoopRouteNavigator))
    }
}

/// Copyable handle to the single application state slot.
///
/// All mutation goes through [`HippoStore::dispatch`]; the render layers
/// subscribe to [`HippoStore::state`] and never write it directly.
#[derive(Clone, Copy)]
pub struct HippoStore {
    /// The committed state.
    pub state: RwSignal<HippoState>,
    host: StoredValue<HippoHostContext>,
}

impl HippoStore {
    /// Creates the store with the startup state. Must run inside a reactive
    /// runtime.
    pub fn new(host: HippoHostContext) -> Self {
        Self {
            state: create_rw_signal(initialize_hippo_state()),
            host: store_value(host),
        }
    }

    /// Untracked snapshot of the committed state.
    pub fn current(&self) -> HippoState {
        self.state.get_untracked()
    }

    /// The injected host services.
    pub fn host(&self) -> HippoHostContext {
        self.host.get_value()
    }

    /// Runs `action` through the reducer and commits the result. A result
    /// equal to the current state is not committed, so subscribers only run
    /// on real transitions.
    ///
    /// # Errors
    /// Whatever the reducer rejects; the state is left untouched then.
    pub fn dispatch(&self, action: HippoAction) -> Result<(), HippoError> {
        let current = self.state.get_untracked();
        let next = reduce(&current, action)?;
        if next != current {
            self.state.set(next);
        }
        // Tasks spawned by subscribers of this commit run now, once the
        // commit itself is over.
        crate::loads::pump();
        Ok(())
    }

    /// Dispatch for fire-and-forget callers: rejections are logged instead of
    /// returned.
    pub fn dispatch_logged(&self, action: HippoAction) {
        if let Err(err) = self.dispatch(action) {
            logging::warn!("hippo reducer rejected an action: {err}");
        }
    }
}
