//! Guarded asynchronous loads and their completion dispatches.
//!
//! Every load function follows the same bracket: skip unless the download
//! status is `NotInitialized`, dispatch the start action, await the host
//! loader, then dispatch the completion or failure action. The status check
//! makes duplicate triggers harmless; a trigger for data that is in flight or
//! already loaded simply returns. Reloads happen because the reducer drops
//! the status back to `NotInitialized` when a query input changes.

use std::future::Future;

use hippo_host::LoadTarget;
use leptos::logging;

use crate::model::{AsyncActionStatus, View};
use crate::reducer::HippoAction;
use crate::store::HippoStore;

/// Schedules a fire-and-forget task on the host's single-threaded executor.
///
/// In the browser this is a real `spawn_local`; the task runs once the
/// current call stack has unwound. Off wasm the task is queued and runs at
/// the next [`pump`], which the store invokes after every commit, giving the
/// same run-after-the-current-transition ordering.
pub(crate) fn spawn_load(fut: impl Future<Output = ()> + 'static) {
    #[cfg(target_arch = "wasm32")]
    leptos::spawn_local(fut);
    #[cfg(not(target_arch = "wasm32"))]
    task_queue::enqueue(fut);
}

/// Runs queued tasks to completion. No-op in the browser, where the event
/// loop does the pumping, and while a pump is already running.
pub(crate) fn pump() {
    #[cfg(not(target_arch = "wasm32"))]
    task_queue::drain();
}

/// Loads base dates, then base items, in one task.
pub(crate) fn spawn_base_loads(store: HippoStore) {
    spawn_load(async move {
        load_base_dates(store).await;
        load_base_items(store).await;
    });
}

/// Loads integrations for the current filter.
pub(crate) fn spawn_integration_load(store: HippoStore) {
    spawn_load(async move { load_integrations(store).await });
}

/// Loads statistics for the current filter.
pub(crate) fn spawn_statistics_load(store: HippoStore) {
    spawn_load(async move { load_statistics(store).await });
}

/// Loads per-date history for the current filter.
pub(crate) fn spawn_history_load(store: HippoStore) {
    spawn_load(async move { load_history(store).await });
}

async fn load_base_dates(store: HippoStore) {
    if store.current().download_base_dates_status != AsyncActionStatus::NotInitialized {
        return;
    }
    store.dispatch_logged(HippoAction::SetDownloadBaseDatesStatus(
        AsyncActionStatus::Initialized,
    ));
    let loader = store.host().data_loader();
    match loader.load_base_dates().await {
        Ok(dates) => store.dispatch_logged(HippoAction::DoneDownloadBaseDates(dates)),
        Err(message) => fail(store, LoadTarget::BaseDates, message),
    }
}

async fn load_base_items(store: HippoStore) {
    if store.current().download_base_item_status != AsyncActionStatus::NotInitialized {
        return;
    }
    store.dispatch_logged(HippoAction::StartDownloadBaseItems);
    let loader = store.host().data_loader();
    match loader.load_base_items().await {
        Ok(bundle) => {
            store.dispatch_logged(HippoAction::DoneDownloadBaseItems(Box::new(bundle)));
        }
        Err(message) => fail(store, LoadTarget::BaseItems, message),
    }
}

async fn load_integrations(store: HippoStore) {
    if store.current().download_integration_status != AsyncActionStatus::NotInitialized {
        return;
    }
    store.dispatch_logged(HippoAction::StartDownloadIntegrations);
    let params = store.current().query_params(View::Hippo);
    let loader = store.host().data_loader();
    match loader.load_integrations(&params).await {
        Ok(records) => store.dispatch_logged(HippoAction::DoneDownloadIntegrations(records)),
        Err(message) => fail(store, LoadTarget::Integrations, message),
    }
}

async fn load_statistics(store: HippoStore) {
    if store.current().download_statistics_status != AsyncActionStatus::NotInitialized {
        return;
    }
    store.dispatch_logged(HippoAction::StartDownloadStatistics);
    let params = store.current().query_params(View::StatAdvanced);
    let loader = store.host().data_loader();
    match loader.load_statistics(&params).await {
        Ok(blob) => store.dispatch_logged(HippoAction::DoneDownloadStatistics(blob)),
        Err(message) => fail(store, LoadTarget::Statistics, message),
    }
}

async fn load_history(store: HippoStore) {
    if store.current().download_history_status != AsyncActionStatus::NotInitialized {
        return;
    }
    store.dispatch_logged(HippoAction::StartDownloadHistory);
    let params = store.current().query_params(View::StatAdvanced);
    let loader = store.host().data_loader();
    match loader.load_history(&params).await {
        Ok(history) => store.dispatch_logged(HippoAction::DoneDownloadHistory(history)),
        Err(message) => fail(store, LoadTarget::History, message),
    }
}

fn fail(store: HippoStore, target: LoadTarget, message: String) {
    logging::warn!("{} load failed: {message}", target.label());
    store.dispatch_logged(HippoAction::DownloadFailed { target, message });
}

/// Single-threaded task queue for non-wasm targets, mainly tests. Tasks run
/// to completion in FIFO order; a task spawned while another runs joins the
/// back of the queue instead of starting a nested executor. Draining is kept
/// separate from enqueueing so that tasks spawned during a state commit only
/// start after the commit's subscribers have finished running.
#[cfg(not(target_arch = "wasm32"))]
mod task_queue {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::future::Future;
    use std::pin::Pin;

    type Task = Pin<Box<dyn Future<Output = ()>>>;

    thread_local! {
        static QUEUE: RefCell<VecDeque<Task>> = RefCell::new(VecDeque::new());
        static DRAINING: Cell<bool> = Cell::new(false);
    }

    pub(super) fn enqueue(fut: impl Future<Output = ()> + 'static) {
        QUEUE.with(|queue| queue.borrow_mut().push_back(Box::pin(fut)));
    }

    pub(super) fn drain() {
        if DRAINING.with(Cell::get) {
            return;
        }
        DRAINING.with(|draining| draining.set(true));
        while let Some(task) = QUEUE.with(|queue| queue.borrow_mut().pop_front()) {
            futures::executor::block_on(task);
        }
        DRAINING.with(|draining| draining.set(false));
    }
}
