//! Asynchronous read access to the integration and statistics backend.
//!
//! The runtime depends only on the [`DataLoader`] trait; hosts plug in a
//! fetch-backed implementation while tests use [`MemoryDataLoader`].

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use crate::types::{BaseDates, BaseItemsBundle, HistoryMap, Integration, StatisticsBlob};

/// Boxed future type used by [`DataLoader`] methods so the trait stays
/// object-safe.
pub type DataLoaderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// The loadable backend resources, used for failure reporting and for fault
/// injection in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTarget {
    /// Available integration and statistics dates.
    BaseDates,
    /// Reference entities.
    BaseItems,
    /// Integration routes for a filter.
    Integrations,
    /// Aggregated call statistics for a filter.
    Statistics,
    /// Per-date call history for a filter.
    History,
}

impl LoadTarget {
    /// Short lowercase name for log and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            LoadTarget::BaseDates => "base dates",
            LoadTarget::BaseItems => "base items",
            LoadTarget::Integrations => "integrations",
            LoadTarget::Statistics => "statistics",
            LoadTarget::History => "history",
        }
    }
}

/// Read access to the backend. `params` arguments carry a prebuilt query
/// string, date bounds and selected-item filters included.
pub trait DataLoader {
    /// Loads the dates for which the backend holds data.
    fn load_base_dates<'a>(&'a self) -> DataLoaderFuture<'a, Result<BaseDates, String>>;

    /// Loads all reference entities.
    fn load_base_items<'a>(&'a self) -> DataLoaderFuture<'a, Result<BaseItemsBundle, String>>;

    /// Loads the integration routes matching `params`.
    fn load_integrations<'a>(
        &'a self,
        params: &'a str,
    ) -> DataLoaderFuture<'a, Result<Vec<Integration>, String>>;

    /// Loads aggregated call statistics matching `params`.
    fn load_statistics<'a>(
        &'a self,
        params: &'a str,
    ) -> DataLoaderFuture<'a, Result<StatisticsBlob, String>>;

    /// Loads per-date call totals matching `params`.
    fn load_history<'a>(
        &'a self,
        params: &'a str,
    ) -> DataLoaderFuture<'a, Result<HistoryMap, String>>;
}

/// Loader that serves empty payloads, for hosts without a backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDataLoader;

impl DataLoader for NoopDataLoader {
    fn load_base_dates<'a>(&'a self) -> DataLoaderFuture<'a, Result<BaseDates, String>> {
        Box::pin(async { Ok(BaseDates::default()) })
    }

    fn load_base_items<'a>(&'a self) -> DataLoaderFuture<'a, Result<BaseItemsBundle, String>> {
        Box::pin(async { Ok(BaseItemsBundle::default()) })
    }

    fn load_integrations<'a>(
        &'a self,
        _params: &'a str,
    ) -> DataLoaderFuture<'a, Result<Vec<Integration>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn load_statistics<'a>(
        &'a self,
        _params: &'a str,
    ) -> DataLoaderFuture<'a, Result<StatisticsBlob, String>> {
        Box::pin(async { Ok(StatisticsBlob::default()) })
    }

    fn load_history<'a>(
        &'a self,
        _params: &'a str,
    ) -> DataLoaderFuture<'a, Result<HistoryMap, String>> {
        Box::pin(async { Ok(HistoryMap::new()) })
    }
}

/// Call counts and captured query params recorded by [`MemoryDataLoader`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderJournal {
    /// Calls to [`DataLoader::load_base_dates`].
    pub base_dates_calls: usize,
    /// Calls to [`DataLoader::load_base_items`].
    pub base_items_calls: usize,
    /// Calls to [`DataLoader::load_integrations`].
    pub integration_calls: usize,
    /// Calls to [`DataLoader::load_statistics`].
    pub statistics_calls: usize,
    /// Calls to [`DataLoader::load_history`].
    pub history_calls: usize,
    /// Params of the most recent integrations call.
    pub last_integration_params: Option<String>,
    /// Params of the most recent statistics call.
    pub last_statistics_params: Option<String>,
    /// Params of the most recent history call.
    pub last_history_params: Option<String>,
}

#[derive(Debug, Default)]
struct MemoryFixtures {
    base_dates: BaseDates,
    base_items: BaseItemsBundle,
    integrations: Vec<Integration>,
    statistics: StatisticsBlob,
    history: HistoryMap,
    failing: Option<LoadTarget>,
}

/// In-memory loader for tests: serves cloned fixtures, journals every call,
/// and can be told to fail one target.
///
/// Clones share the same fixtures and journal, so a test can keep a handle
/// while handing another to the runtime.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataLoader {
    fixtures: Rc<RefCell<MemoryFixtures>>,
    journal: Rc<RefCell<LoaderJournal>>,
}

impl MemoryDataLoader {
    /// Creates a loader with empty fixtures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the date fixture.
    pub fn with_base_dates(self, base_dates: BaseDates) -> Self {
        self.fixtures.borrow_mut().base_dates = base_dates;
        self
    }

    /// Sets the reference-entity fixture.
    pub fn with_base_items(self, base_items: BaseItemsBundle) -> Self {
        self.fixtures.borrow_mut().base_items = base_items;
        self
    }

    /// Sets the integrations fixture.
    pub fn with_integrations(self, integrations: Vec<Integration>) -> Self {
        self.fixtures.borrow_mut().integrations = integrations;
        self
    }

    /// Sets the statistics fixture.
    pub fn with_statistics(self, statistics: StatisticsBlob) -> Self {
        self.fixtures.borrow_mut().statistics = statistics;
        self
    }

    /// Sets the history fixture.
    pub fn with_history(self, history: HistoryMap) -> Self {
        self.fixtures.borrow_mut().history = history;
        self
    }

    /// Makes every load of `target` fail until changed.
    pub fn with_failure(self, target: LoadTarget) -> Self {
        self.fixtures.borrow_mut().failing = Some(target);
        self
    }

    /// Snapshot of the journal so far.
    pub fn journal(&self) -> LoaderJournal {
        self.journal.borrow().clone()
    }

    fn check_failure(&self, target: LoadTarget) -> Result<(), String> {
        if self.fixtures.borrow().failing == Some(target) {
            Err(format!("memory loader: {} unavailable", target.label()))
        } else {
            Ok(())
        }
    }
}

impl DataLoader for MemoryDataLoader {
    fn load_base_dates<'a>(&'a self) -> DataLoaderFuture<'a, Result<BaseDates, String>> {
        Box::pin(async move {
            self.journal.borrow_mut().base_dates_calls += 1;
            self.check_failure(LoadTarget::BaseDates)?;
            Ok(self.fixtures.borrow().base_dates.clone())
        })
    }

    fn load_base_items<'a>(&'a self) -> DataLoaderFuture<'a, Result<BaseItemsBundle, String>> {
        Box::pin(async move {
            self.journal.borrow_mut().base_items_calls += 1;
            self.check_failure(LoadTarget::BaseItems)?;
            Ok(self.fixtures.borrow().base_items.clone())
        })
    }

    fn load_integrations<'a>(
        &'a self,
        params: &'a str,
    ) -> DataLoaderFuture<'a, Result<Vec<Integration>, String>> {
        Box::pin(async move {
            {
                let mut journal = self.journal.borrow_mut();
                journal.integration_calls += 1;
                journal.last_integration_params = Some(params.to_string());
            }
            self.check_failure(LoadTarget::Integrations)?;
            Ok(self.fixtures.borrow().integrations.clone())
        })
    }

    fn load_statistics<'a>(
        &'a self,
        params: &'a str,
    ) -> DataLoaderFuture<'a, Result<StatisticsBlob, String>> {
        Box::pin(async move {
            {
                let mut journal = self.journal.borrow_mut();
                journal.statistics_calls += 1;
                journal.last_statistics_params = Some(params.to_string());
            }
            self.check_failure(LoadTarget::Statistics)?;
            Ok(self.fixtures.borrow().statistics.clone())
        })
    }

    fn load_history<'a>(
        &'a self,
        params: &'a str,
    ) -> DataLoaderFuture<'a, Result<HistoryMap, String>> {
        Box::pin(async move {
            {
                let mut journal = self.journal.borrow_mut();
                journal.history_calls += 1;
                journal.last_history_params = Some(params.to_string());
            }
            self.check_failure(LoadTarget::History)?;
            Ok(self.fixtures.borrow().history.clone())
        })
    }
}
