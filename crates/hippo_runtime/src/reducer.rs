//! Actions and the pure reducer that derives each next state.

use hippo_host::types::{
    BaseDates, BaseItemsBundle, HistoryMap, Integration, MaxCounters, StatisticsBlob,
};
use hippo_host::LoadTarget;
use thiserror::Error;

use crate::bookmark::BookmarkInformation;
use crate::model::{AsyncActionStatus, DateType, HippoState, ItemType, View};
use crate::preselect::ViewPreselect;

/// Conditions that abort an operation instead of producing a next state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HippoError {
    /// A view switch asked for the view that is already active.
    #[error("view {0:?} is already active")]
    SameViewRequested(View),
    /// A preset label was requested that the active catalog does not have.
    #[error("unknown preselect label: {0}")]
    UnknownPreselect(String),
}

/// Every state transition the application can request.
#[derive(Debug, Clone, PartialEq)]
pub enum HippoAction {
    /// Marks the base-item load as started.
    StartDownloadBaseItems,
    /// Stores loaded reference entities and completes the base-item load.
    DoneDownloadBaseItems(Box<BaseItemsBundle>),
    /// Moves the base-date load through its lifecycle.
    SetDownloadBaseDatesStatus(AsyncActionStatus),
    /// Stores the loaded date lists and completes the base-date load.
    DoneDownloadBaseDates(BaseDates),
    /// Merges a decoded bookmark and activates a view.
    ApplyBookmark {
        /// View the bookmarked location addresses.
        view: View,
        /// Decoded filter fields.
        bookmark: BookmarkInformation,
    },
    /// Sets one of the date fields.
    DateSelected {
        /// Which date field.
        date_type: DateType,
        /// The date, `yyyy-mm-dd`.
        date: String,
    },
    /// Adds an id to a selection list.
    ItemIdSelected {
        /// Which list.
        item_type: ItemType,
        /// The id to add.
        id: i32,
    },
    /// Removes an id from a selection list.
    ItemIdDeselected {
        /// Which list.
        item_type: ItemType,
        /// The id to remove.
        id: i32,
    },
    /// Selects the one-hop chain of a statistics platform.
    StatTpSelected(i32),
    /// Switches the active view.
    SetView(View),
    /// Activates a preset in the simple statistics view.
    SetSimpleViewPreselect(ViewPreselect),
    /// Activates a preset in the advanced statistics view.
    SetAdvancedViewPreselect(ViewPreselect),
    /// Shows or hides the history time graph.
    ShowTimeGraph(bool),
    /// Shows technical names instead of descriptions.
    ShowTechnicalTerms(bool),
    /// Changes the row limit of one item column.
    SetVMax {
        /// Which column.
        item_type: ItemType,
        /// The new limit.
        max: usize,
    },
    /// Marks the integrations load as started.
    StartDownloadIntegrations,
    /// Stores loaded integrations and completes that load.
    DoneDownloadIntegrations(Vec<Integration>),
    /// Marks the statistics load as started.
    StartDownloadStatistics,
    /// Stores loaded statistics and completes that load.
    DoneDownloadStatistics(StatisticsBlob),
    /// Marks the history load as started.
    StartDownloadHistory,
    /// Stores loaded history and completes that load.
    DoneDownloadHistory(HistoryMap),
    /// Records a failed load.
    DownloadFailed {
        /// Which load failed.
        target: LoadTarget,
        /// Why it failed.
        message: String,
    },
}

/// Applies `action` to `state` and returns the next state.
///
/// After every transition the loaded-data statuses are reconciled: when the
/// fields feeding a query changed, the corresponding download status drops
/// back to [`AsyncActionStatus::NotInitialized`] so the stale payload gets
/// reloaded.
///
/// # Errors
/// [`HippoError::SameViewRequested`] when a view switch targets the active
/// view.
pub fn reduce(state: &HippoState, action: HippoAction) -> Result<HippoState, HippoError> {
    let next = apply(state, action)?;
    Ok(invalidate_stale_downloads(state, next))
}

fn apply(state: &HippoState, action: HippoAction) -> Result<HippoState, HippoError> {
    let next = match action {
        HippoAction::StartDownloadBaseItems => {
            let mut next = state.clone();
            next.download_base_item_status = AsyncActionStatus::Initialized;
            next.error_message = None;
            next
        }
        HippoAction::DoneDownloadBaseItems(bundle) => {
            let bundle = *bundle;
            let mut next = state.clone();
            next.service_components = bundle.service_components;
            next.logical_addresses = bundle.logical_addresses;
            next.service_contracts = bundle.service_contracts;
            next.service_domains = bundle.service_domains;
            next.platforms = bundle.platforms;
            next.platform_chains = bundle.platform_chains;
            next.statistics_platforms = bundle.statistics_platforms;
            next.download_base_item_status = AsyncActionStatus::Completed;
            next
        }
        HippoAction::SetDownloadBaseDatesStatus(status) => {
            let mut next = state.clone();
            next.download_base_dates_status = status;
            if status == AsyncActionStatus::Initialized {
                next.error_message = None;
            }
            next
        }
        HippoAction::DoneDownloadBaseDates(dates) => {
            let mut next = state.clone();
            next.integration_dates = dates.integration_dates;
            next.statistics_dates = dates.statistics_dates;
            next.download_base_dates_status = AsyncActionStatus::Completed;
            // First date knowledge: open the integration view on the newest
            // available snapshot.
            if next.date_effective.is_none() {
                if let Some(newest) = next.integration_dates.last().cloned() {
                    next.date_effective = Some(newest.clone());
                    next.date_end = Some(newest);
                }
            }
            next
        }
        HippoAction::ApplyBookmark { view, bookmark } => state.apply_bookmark(view, &bookmark),
        HippoAction::DateSelected { date_type, date } => state.date_selected(date_type, &date),
        HippoAction::ItemIdSelected { item_type, id } => state.item_id_selected(id, item_type),
        HippoAction::ItemIdDeselected { item_type, id } => state.item_id_deselected(id, item_type),
        HippoAction::StatTpSelected(platform_id) => state.stat_tp_selected(platform_id),
        HippoAction::SetView(view) => state.set_new_view(view)?,
        HippoAction::SetSimpleViewPreselect(preset) => {
            let mut next = state.apply_filtered_items(&preset.filtered_items);
            next.simple_view_preselect = preset;
            next.show_time_graph = false;
            next
        }
        HippoAction::SetAdvancedViewPreselect(preset) => {
            let mut next = state.apply_filtered_items(&preset.filtered_items);
            next.advanced_view_preselect = Some(preset);
            next.show_time_graph = false;
            next
        }
        HippoAction::ShowTimeGraph(show) => {
            let mut next = state.clone();
            next.show_time_graph = show;
            next
        }
        HippoAction::ShowTechnicalTerms(show) => {
            let mut next = state.clone();
            next.show_technical_terms = show;
            next
        }
        HippoAction::SetVMax { item_type, max } => {
            let mut next = state.clone();
            match item_type {
                ItemType::Consumer => next.v_service_consumers_max = max,
                ItemType::Producer => next.v_service_producers_max = max,
                ItemType::LogicalAddress => next.v_logical_addresses_max = max,
                ItemType::Contract => next.v_service_contracts_max = max,
                // Domains and chains render without a row limit.
                ItemType::Domain | ItemType::PlatformChain => {}
            }
            next
        }
        HippoAction::StartDownloadIntegrations => {
            let mut next = state.clone();
            next.download_integration_status = AsyncActionStatus::Initialized;
            next.error_message = None;
            next
        }
        HippoAction::DoneDownloadIntegrations(records) => {
            let mut next = state.clone();
            next.max_counters = MaxCounters::from_integrations(&records);
            next.integrations = records;
            next.download_integration_status = AsyncActionStatus::Completed;
            next
        }
        HippoAction::StartDownloadStatistics => {
            let mut next = state.clone();
            next.download_statistics_status = AsyncActionStatus::Initialized;
            next.error_message = None;
            next
        }
        HippoAction::DoneDownloadStatistics(blob) => {
            let mut next = state.clone();
            next.statistics_blob = blob;
            next.download_statistics_status = AsyncActionStatus::Completed;
            next
        }
        HippoAction::StartDownloadHistory => {
            let mut next = state.clone();
            next.download_history_status = AsyncActionStatus::Initialized;
            next.error_message = None;
            next
        }
        HippoAction::DoneDownloadHistory(history) => {
            let mut next = state.clone();
            next.history_map = history;
            next.download_history_status = AsyncActionStatus::Completed;
            next
        }
        HippoAction::DownloadFailed { target, message } => {
            let mut next = state.clone();
            let status = match target {
                LoadTarget::BaseDates => &mut next.download_base_dates_status,
                LoadTarget::BaseItems => &mut next.download_base_item_status,
                LoadTarget::Integrations => &mut next.download_integration_status,
                LoadTarget::Statistics => &mut next.download_statistics_status,
                LoadTarget::History => &mut next.download_history_status,
            };
            *status = AsyncActionStatus::Error;
            next.error_message = Some(message);
            next
        }
    };
    Ok(next)
}

/// Drops download statuses whose query inputs changed in this transition.
/// The reactor re-issues the loads once the new state is committed.
fn invalidate_stale_downloads(previous: &HippoState, mut next: HippoState) -> HippoState {
    if next.is_integration_selections_changed(previous) {
        next.download_integration_status = AsyncActionStatus::NotInitialized;
    }
    if next.is_statistics_selections_changed(previous) {
        next.download_statistics_status = AsyncActionStatus::NotInitialized;
        next.download_history_status = AsyncActionStatus::NotInitialized;
    }
    next
}
