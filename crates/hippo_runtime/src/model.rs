//! The application state snapshot and its pure transformation methods.
//!
//! `HippoState` is an immutable value: every transformation returns a new
//! snapshot and leaves its input untouched. The reducer is the only caller of
//! these methods outside of tests.

use std::collections::HashMap;

use chrono::Utc;
use hippo_host::types::{
    calculate_platform_chain_id, Integration, LogicalAddress, MaxCounters, Platform,
    PlatformChain, ServiceComponent, ServiceContract, ServiceDomain, StatisticsBlob,
    StatisticsPlatform,
};
use serde::Serialize;

use crate::bookmark::BookmarkInformation;
use crate::dates;
use crate::preselect::{self, FilteredItems, ViewPreselect};
use crate::reducer::HippoError;

/// Platform selected for statistics when the user has not picked one.
pub const FALLBACK_STAT_PLATFORM: &str = "SLL-PROD";

const DEFAULT_COMPONENT_ROWS_MAX: usize = 100;
const DEFAULT_CONTRACT_ROWS_MAX: usize = 500;

/// Top-level navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum View {
    /// Landing route, immediately redirected to [`View::Hippo`].
    Home,
    /// The integration explorer.
    Hippo,
    /// Statistics with the curated preset picker only.
    StatSimple,
    /// Statistics with full per-item filtering.
    StatAdvanced,
}

impl View {
    /// Route path for this view, leading slash included.
    pub fn path(&self) -> &'static str {
        match self {
            View::Home => "/",
            View::Hippo => "/hippo",
            View::StatSimple => "/stat-simple",
            View::StatAdvanced => "/stat-advanced",
        }
    }

    /// Maps an href or route to the view it addresses. A full href routes on
    /// its fragment alone, so a host name never passes for a route; a bare
    /// path routes as-is. Unrecognised locations land on [`View::Home`].
    pub fn from_href(href: &str) -> View {
        let route = match href.split_once('#') {
            Some((_, fragment)) => fragment,
            // A full href without a fragment addresses no view.
            None if href.contains("://") => return View::Home,
            None => href,
        };
        if route.contains("/stat-advanced") {
            View::StatAdvanced
        } else if route.contains("/stat-simple") {
            View::StatSimple
        } else if route.contains("/hippo") {
            View::Hippo
        } else {
            View::Home
        }
    }

    /// True for both statistics view modes.
    pub fn is_statistics(&self) -> bool {
        matches!(self, View::StatSimple | View::StatAdvanced)
    }
}

/// Lifecycle of one loadable backend resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AsyncActionStatus {
    /// Nothing fetched yet, or the last result was invalidated.
    #[default]
    NotInitialized,
    /// A fetch is in flight.
    Initialized,
    /// The last fetch succeeded and its payload is in state.
    Completed,
    /// The last fetch failed.
    Error,
}

/// The item categories a user can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemType {
    /// Consumer components.
    Consumer,
    /// Producer components.
    Producer,
    /// Logical addresses.
    LogicalAddress,
    /// Service contracts.
    Contract,
    /// Service domains.
    Domain,
    /// Platform chains.
    PlatformChain,
}

/// Which date field a date selection addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateType {
    /// Integration view start date.
    Effective,
    /// Integration view end date.
    End,
    /// Both integration view dates at once.
    EffectiveAndEnd,
    /// Statistics period start date.
    StatEffective,
    /// Statistics period end date.
    StatEnd,
}

/// One immutable snapshot of everything the application knows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HippoState {
    /// Active view.
    pub view: View,

    /// Lifecycle of the base-date load.
    pub download_base_dates_status: AsyncActionStatus,
    /// Lifecycle of the base-item load.
    pub download_base_item_status: AsyncActionStatus,
    /// Lifecycle of the integrations load.
    pub download_integration_status: AsyncActionStatus,
    /// Lifecycle of the statistics load.
    pub download_statistics_status: AsyncActionStatus,
    /// Lifecycle of the history load.
    pub download_history_status: AsyncActionStatus,
    /// Message of the most recent failed load.
    pub error_message: Option<String>,

    /// Dates with integration snapshots, oldest first.
    pub integration_dates: Vec<String>,
    /// Dates with call statistics, oldest first.
    pub statistics_dates: Vec<String>,

    /// Consumer and producer components by id.
    pub service_components: HashMap<i32, ServiceComponent>,
    /// Logical addresses by id.
    pub logical_addresses: HashMap<i32, LogicalAddress>,
    /// Service contracts by id.
    pub service_contracts: HashMap<i32, ServiceContract>,
    /// Service domains by id.
    pub service_domains: HashMap<i32, ServiceDomain>,
    /// Platforms by id.
    pub platforms: HashMap<i32, Platform>,
    /// Routing chains by derived chain id.
    pub platform_chains: HashMap<i32, PlatformChain>,
    /// Statistics-capable platforms by id.
    pub statistics_platforms: HashMap<i32, StatisticsPlatform>,

    /// Integration view start date; `None` until dates are known.
    pub date_effective: Option<String>,
    /// Integration view end date; `None` until dates are known.
    pub date_end: Option<String>,
    /// Statistics period start date.
    pub stat_date_effective: String,
    /// Statistics period end date.
    pub stat_date_end: String,
    /// Startup default for [`HippoState::stat_date_effective`].
    pub default_stat_date_effective: String,
    /// Startup default for [`HippoState::stat_date_end`].
    pub default_stat_date_end: String,

    /// Selected consumer ids, in selection order.
    pub selected_consumers: Vec<i32>,
    /// Selected producer ids, in selection order.
    pub selected_producers: Vec<i32>,
    /// Selected logical address ids, in selection order.
    pub selected_logical_addresses: Vec<i32>,
    /// Selected contract ids, in selection order.
    pub selected_contracts: Vec<i32>,
    /// Selected domain ids, in selection order.
    pub selected_domains: Vec<i32>,
    /// Selected chain ids, in selection order.
    pub selected_platform_chains: Vec<i32>,

    /// Integrations for the current filter.
    pub integrations: Vec<Integration>,
    /// Distinct-entity totals over [`HippoState::integrations`].
    pub max_counters: MaxCounters,

    /// Row limit for the consumer column.
    pub v_service_consumers_max: usize,
    /// Row limit for the producer column.
    pub v_service_producers_max: usize,
    /// Row limit for the logical address column.
    pub v_logical_addresses_max: usize,
    /// Row limit for the contract column.
    pub v_service_contracts_max: usize,

    /// Statistics for the current filter.
    pub statistics_blob: StatisticsBlob,
    /// Per-date call totals for the current filter.
    pub history_map: HashMap<String, i64>,
    /// Whether the history time graph is shown.
    pub show_time_graph: bool,
    /// Whether technical names are shown instead of descriptions.
    pub show_technical_terms: bool,

    /// Active preset of the simple statistics view.
    pub simple_view_preselect: ViewPreselect,
    /// Active preset of the advanced statistics view, `None` after the user
    /// has diverged from every preset.
    pub advanced_view_preselect: Option<ViewPreselect>,
}

/// Creates the startup state: nothing loaded, nothing selected, statistics
/// period defaulted to the previous calendar month.
pub fn initialize_hippo_state() -> HippoState {
    let (month_start, month_end) = dates::previous_month_range(Utc::now().date_naive());
    let stat_date_effective = dates::to_swedish_date(month_start);
    let stat_date_end = dates::to_swedish_date(month_end);
    HippoState {
        view: View::Home,
        download_base_dates_status: AsyncActionStatus::NotInitialized,
        download_base_item_status: AsyncActionStatus::NotInitialized,
        download_integration_status: AsyncActionStatus::NotInitialized,
        download_statistics_status: AsyncActionStatus::NotInitialized,
        download_history_status: AsyncActionStatus::NotInitialized,
        error_message: None,
        integration_dates: Vec::new(),
        statistics_dates: Vec::new(),
        service_components: HashMap::new(),
        logical_addresses: HashMap::new(),
        service_contracts: HashMap::new(),
        service_domains: HashMap::new(),
        platforms: HashMap::new(),
        platform_chains: HashMap::new(),
        statistics_platforms: HashMap::new(),
        date_effective: None,
        date_end: None,
        stat_date_effective: stat_date_effective.clone(),
        stat_date_end: stat_date_end.clone(),
        default_stat_date_effective: stat_date_effective,
        default_stat_date_end: stat_date_end,
        selected_consumers: Vec::new(),
        selected_producers: Vec::new(),
        selected_logical_addresses: Vec::new(),
        selected_contracts: Vec::new(),
        selected_domains: Vec::new(),
        selected_platform_chains: Vec::new(),
        integrations: Vec::new(),
        max_counters: MaxCounters::default(),
        v_service_consumers_max: DEFAULT_COMPONENT_ROWS_MAX,
        v_service_producers_max: DEFAULT_COMPONENT_ROWS_MAX,
        v_logical_addresses_max: DEFAULT_COMPONENT_ROWS_MAX,
        v_service_contracts_max: DEFAULT_CONTRACT_ROWS_MAX,
        statistics_blob: StatisticsBlob::default(),
        history_map: HashMap::new(),
        show_time_graph: false,
        show_technical_terms: false,
        simple_view_preselect: preselect::simple_view_default(),
        advanced_view_preselect: None,
    }
}

impl HippoState {
    /// The selection list for `item_type`.
    pub fn selection(&self, item_type: ItemType) -> &[i32] {
        match item_type {
            ItemType::Consumer => &self.selected_consumers,
            ItemType::Producer => &self.selected_producers,
            ItemType::LogicalAddress => &self.selected_logical_addresses,
            ItemType::Contract => &self.selected_contracts,
            ItemType::Domain => &self.selected_domains,
            ItemType::PlatformChain => &self.selected_platform_chains,
        }
    }

    fn selection_mut(&mut self, item_type: ItemType) -> &mut Vec<i32> {
        match item_type {
            ItemType::Consumer => &mut self.selected_consumers,
            ItemType::Producer => &mut self.selected_producers,
            ItemType::LogicalAddress => &mut self.selected_logical_addresses,
            ItemType::Contract => &mut self.selected_contracts,
            ItemType::Domain => &mut self.selected_domains,
            ItemType::PlatformChain => &mut self.selected_platform_chains,
        }
    }

    /// Whether `id` is in the selection for `item_type`.
    pub fn is_item_selected(&self, id: i32, item_type: ItemType) -> bool {
        self.selection(item_type).contains(&id)
    }

    /// Whether any platform chain is selected.
    pub fn is_stat_platform_selected(&self) -> bool {
        !self.selected_platform_chains.is_empty()
    }

    /// The platform id carrying `name`, if that platform is known.
    pub fn platform_id_by_name(&self, name: &str) -> Option<i32> {
        self.platforms
            .values()
            .find(|platform| platform.name == name)
            .map(|platform| platform.id)
    }

    /// Adds `id` to the selection for `item_type`. Selecting an id that is
    /// already in the list leaves the state unchanged; a real addition drops
    /// the advanced preset, which no longer describes the selections.
    pub fn item_id_selected(&self, id: i32, item_type: ItemType) -> HippoState {
        if self.is_item_selected(id, item_type) {
            return self.clone();
        }
        let mut next = self.clone();
        next.selection_mut(item_type).push(id);
        next.advanced_view_preselect = None;
        next
    }

    /// Removes `id` from the selection for `item_type`. Deselecting an absent
    /// id leaves the state unchanged; a real removal drops the advanced
    /// preset.
    pub fn item_id_deselected(&self, id: i32, item_type: ItemType) -> HippoState {
        if !self.is_item_selected(id, item_type) {
            return self.clone();
        }
        let mut next = self.clone();
        next.selection_mut(item_type).retain(|other| *other != id);
        next.advanced_view_preselect = None;
        next
    }

    /// Sets the date field addressed by `date_type`.
    pub fn date_selected(&self, date_type: DateType, date: &str) -> HippoState {
        let mut next = self.clone();
        match date_type {
            DateType::Effective => next.date_effective = Some(date.to_string()),
            DateType::End => next.date_end = Some(date.to_string()),
            DateType::EffectiveAndEnd => {
                next.date_effective = Some(date.to_string());
                next.date_end = Some(date.to_string());
            }
            DateType::StatEffective => next.stat_date_effective = date.to_string(),
            DateType::StatEnd => next.stat_date_end = date.to_string(),
        }
        next
    }

    /// Replaces the chain selection with the one-hop chain of `platform_id`
    /// and re-arms the advanced view on its default preset. Item selections
    /// are kept; choosing a platform narrows where statistics come from, not
    /// what is being asked about.
    pub fn stat_tp_selected(&self, platform_id: i32) -> HippoState {
        let mut next = self.clone();
        next.selected_platform_chains =
            vec![calculate_platform_chain_id(platform_id, None, platform_id)];
        next.advanced_view_preselect = Some(preselect::advanced_view_default());
        next
    }

    /// Replaces the five item selection lists with the preset lists. The
    /// chain selection is kept.
    pub fn apply_filtered_items(&self, items: &FilteredItems) -> HippoState {
        let mut next = self.clone();
        next.selected_consumers = items.consumers.to_vec();
        next.selected_producers = items.producers.to_vec();
        next.selected_logical_addresses = items.logical_addresses.to_vec();
        next.selected_contracts = items.contracts.to_vec();
        next.selected_domains = items.domains.to_vec();
        next
    }

    /// Whether the five item selection lists match the preset lists exactly.
    pub fn matches_filtered_items(&self, items: &FilteredItems) -> bool {
        self.selected_consumers == items.consumers
            && self.selected_producers == items.producers
            && self.selected_logical_addresses == items.logical_addresses
            && self.selected_contracts == items.contracts
            && self.selected_domains == items.domains
    }

    /// Switches to `new_view`, carrying statistics context across compatible
    /// switches.
    ///
    /// Between the two statistics modes the active preset label carries over
    /// when the target catalog has it, and falls back to the target default
    /// otherwise; the chosen preset's selections are applied. Entering
    /// statistics from the integration view reduces a selected routing chain
    /// to a one-hop chain of a statistics-capable end platform, preferring
    /// the first hop, then the last, then [`FALLBACK_STAT_PLATFORM`].
    ///
    /// # Errors
    /// [`HippoError::SameViewRequested`] when `new_view` is already active.
    pub fn set_new_view(&self, new_view: View) -> Result<HippoState, HippoError> {
        if new_view == self.view {
            return Err(HippoError::SameViewRequested(new_view));
        }
        let mut next = match (self.view, new_view) {
            (View::StatAdvanced, View::StatSimple) => {
                let label = self
                    .advanced_view_preselect
                    .unwrap_or_else(preselect::advanced_view_default)
                    .label;
                let preset = preselect::simple_view_preselect(label)
                    .unwrap_or_else(preselect::simple_view_default);
                let mut next = self.apply_filtered_items(&preset.filtered_items);
                next.simple_view_preselect = preset;
                next
            }
            (View::StatSimple, View::StatAdvanced) => {
                let preset = preselect::advanced_view_preselect(self.simple_view_preselect.label)
                    .unwrap_or_else(preselect::advanced_view_default);
                let mut next = self.apply_filtered_items(&preset.filtered_items);
                next.advanced_view_preselect = Some(preset);
                next
            }
            (View::Hippo, View::StatSimple) | (View::Hippo, View::StatAdvanced) => {
                self.with_chain_reduced_for_statistics()
            }
            _ => self.clone(),
        };
        next.view = new_view;
        Ok(next)
    }

    /// Reduces the selected routing chain to a one-hop chain of a
    /// statistics-capable platform. Leaves the selection alone when there is
    /// no chain, the chain is unknown, or no capable platform can be found.
    fn with_chain_reduced_for_statistics(&self) -> HippoState {
        let Some(chain_id) = self.selected_platform_chains.first() else {
            return self.clone();
        };
        let Some(chain) = self.platform_chains.get(chain_id) else {
            return self.clone();
        };
        let capable = [chain.first, chain.last]
            .into_iter()
            .find(|id| self.statistics_platforms.contains_key(id))
            .or_else(|| self.platform_id_by_name(FALLBACK_STAT_PLATFORM));
        let Some(platform_id) = capable else {
            return self.clone();
        };
        let mut next = self.clone();
        next.selected_platform_chains =
            vec![calculate_platform_chain_id(platform_id, None, platform_id)];
        next
    }

    /// Merges a decoded bookmark into the state and activates `view`.
    ///
    /// Fields absent from the bookmark keep their current value, except the
    /// statistics dates, which reset to the startup defaults so a dateless
    /// statistics link always means "last month". Afterwards any preset that
    /// no longer describes the selections is dropped (advanced) or reset to
    /// the default (simple).
    pub fn apply_bookmark(&self, view: View, bookmark: &BookmarkInformation) -> HippoState {
        let mut next = self.clone();
        if view.is_statistics() {
            next.stat_date_effective = bookmark
                .date_effective
                .clone()
                .unwrap_or_else(|| self.default_stat_date_effective.clone());
            next.stat_date_end = bookmark
                .date_end
                .clone()
                .unwrap_or_else(|| self.default_stat_date_end.clone());
        } else {
            if let Some(date) = &bookmark.date_effective {
                next.date_effective = Some(date.clone());
            }
            if let Some(date) = &bookmark.date_end {
                next.date_end = Some(date.clone());
            }
        }
        if let Some(ids) = &bookmark.consumers {
            next.selected_consumers = ids.clone();
        }
        if let Some(ids) = &bookmark.producers {
            next.selected_producers = ids.clone();
        }
        if let Some(ids) = &bookmark.logical_addresses {
            next.selected_logical_addresses = ids.clone();
        }
        if let Some(ids) = &bookmark.contracts {
            next.selected_contracts = ids.clone();
        }
        if let Some(ids) = &bookmark.domains {
            next.selected_domains = ids.clone();
        }
        if let Some(ids) = &bookmark.platform_chains {
            next.selected_platform_chains = ids.clone();
        }
        next.view = view;

        if let Some(advanced) = next.advanced_view_preselect {
            if !next.matches_filtered_items(&advanced.filtered_items) {
                next.advanced_view_preselect = None;
            }
        }
        let simple_items = next.simple_view_preselect.filtered_items;
        if !next.matches_filtered_items(&simple_items) {
            next.simple_view_preselect = preselect::simple_view_default();
        }
        next
    }

    /// Builds the backend query string for `view`'s date scope.
    ///
    /// The leading `dummy` parameter keeps every real parameter `&`-prefixed,
    /// which is the shape the backend expects. Selected chains whose id is
    /// not in [`HippoState::platform_chains`] contribute no platform pair.
    pub fn query_params(&self, view: View) -> String {
        let mut params = String::from("?dummy");
        if view.is_statistics() {
            push_param(&mut params, "dateEffective", &self.stat_date_effective);
            push_param(&mut params, "dateEnd", &self.stat_date_end);
        } else {
            push_param(
                &mut params,
                "dateEffective",
                self.date_effective.as_deref().unwrap_or_default(),
            );
            push_param(
                &mut params,
                "dateEnd",
                self.date_end.as_deref().unwrap_or_default(),
            );
        }
        push_id_list(&mut params, "consumerId", &self.selected_consumers);
        push_id_list(&mut params, "domainId", &self.selected_domains);
        push_id_list(&mut params, "contractId", &self.selected_contracts);
        push_id_list(
            &mut params,
            "logicalAddressId",
            &self.selected_logical_addresses,
        );
        push_id_list(&mut params, "producerId", &self.selected_producers);
        for chain_id in &self.selected_platform_chains {
            if let Some(chain) = self.platform_chains.get(chain_id) {
                push_param(&mut params, "firstPlattformId", &chain.first.to_string());
                push_param(&mut params, "lastPlattformId", &chain.last.to_string());
            }
        }
        params
    }

    /// Whether the fields feeding the integrations query differ from `other`.
    pub fn is_integration_selections_changed(&self, other: &HippoState) -> bool {
        self.date_effective != other.date_effective
            || self.date_end != other.date_end
            || self.selections_differ(other)
    }

    /// Whether the fields feeding the statistics query differ from `other`.
    pub fn is_statistics_selections_changed(&self, other: &HippoState) -> bool {
        self.stat_date_effective != other.stat_date_effective
            || self.stat_date_end != other.stat_date_end
            || self.selections_differ(other)
    }

    fn selections_differ(&self, other: &HippoState) -> bool {
        self.selected_consumers != other.selected_consumers
            || self.selected_producers != other.selected_producers
            || self.selected_logical_addresses != other.selected_logical_addresses
            || self.selected_contracts != other.selected_contracts
            || self.selected_domains != other.selected_domains
            || self.selected_platform_chains != other.selected_platform_chains
    }
}

fn push_param(params: &mut String, name: &str, value: &str) {
    params.push('&');
    params.push_str(name);
    params.push('=');
    params.push_str(value);
}

fn push_id_list(params: &mut String, name: &str, ids: &[i32]) {
    if ids.is_empty() {
        return;
    }
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    push_param(params, name, &joined);
}

#[cfg(test)]
mod tests {
    use hippo_host::types::PlatformChain;
    use pretty_assertions::assert_eq;

    use super::*;

    fn state_with_chains() -> HippoState {
        let mut state = initialize_hippo_state();
        state.platforms.insert(
            1,
            Platform {
                id: 1,
                name: "SLL-PROD".into(),
            },
        );
        state.platforms.insert(
            2,
            Platform {
                id: 2,
                name: "NTJP-PROD".into(),
            },
        );
        state.statistics_platforms.insert(
            1,
            StatisticsPlatform {
                id: 1,
                name: "SLL-PROD".into(),
            },
        );
        for chain in [
            PlatformChain {
                first: 1,
                middle: None,
                last: 1,
            },
            PlatformChain {
                first: 2,
                middle: None,
                last: 1,
            },
            PlatformChain {
                first: 2,
                middle: None,
                last: 2,
            },
        ] {
            state.platform_chains.insert(chain.id(), chain);
        }
        state
    }

    #[test]
    fn view_paths_and_href_mapping_agree() {
        for view in [View::Hippo, View::StatSimple, View::StatAdvanced] {
            assert_eq!(View::from_href(view.path()), view);
        }
        assert_eq!(View::from_href("https://host/#/stat-advanced/filter=c5"), View::StatAdvanced);
        assert_eq!(View::from_href("https://host/#/"), View::Home);
    }

    #[test]
    fn fragmentless_hrefs_never_route_on_the_host_name() {
        assert_eq!(View::from_href("https://hippo.example/"), View::Home);
        assert_eq!(View::from_href("https://stat-simple.example"), View::Home);
    }

    #[test]
    fn query_params_carry_dates_selections_and_platform_pairs() {
        let mut state = state_with_chains();
        state.date_effective = Some("2021-02-01".into());
        state.date_end = Some("2021-02-01".into());
        state.selected_consumers = vec![5, 9];
        state.selected_domains = vec![3];
        state.selected_platform_chains = vec![calculate_platform_chain_id(2, None, 1)];

        assert_eq!(
            state.query_params(View::Hippo),
            "?dummy&dateEffective=2021-02-01&dateEnd=2021-02-01\
             &consumerId=5,9&domainId=3&firstPlattformId=2&lastPlattformId=1"
        );
    }

    #[test]
    fn query_params_use_stat_dates_for_statistics_views() {
        let state = state_with_chains();
        let params = state.query_params(View::StatAdvanced);
        assert!(params.starts_with("?dummy&dateEffective="));
        assert!(params.contains(&state.stat_date_effective));
        assert!(params.contains(&state.stat_date_end));
    }

    #[test]
    fn query_params_skip_unknown_chain_ids() {
        let mut state = state_with_chains();
        state.selected_platform_chains = vec![999_999];
        assert!(!state.query_params(View::Hippo).contains("PlattformId"));
    }

    #[test]
    fn selection_transforms_keep_the_source_state() {
        let state = state_with_chains();
        let selected = state.item_id_selected(7, ItemType::Consumer);
        assert_eq!(selected.selected_consumers, vec![7]);
        assert!(state.selected_consumers.is_empty());

        let deselected = selected.item_id_deselected(7, ItemType::Consumer);
        assert!(deselected.selected_consumers.is_empty());
        assert_eq!(selected.selected_consumers, vec![7]);
    }

    #[test]
    fn change_detectors_track_their_field_groups() {
        let state = state_with_chains();
        let other = state.date_selected(DateType::StatEnd, "2019-01-31");
        assert!(other.is_statistics_selections_changed(&state));
        assert!(!other.is_integration_selections_changed(&state));

        let other = state.date_selected(DateType::EffectiveAndEnd, "2021-03-01");
        assert!(other.is_integration_selections_changed(&state));
        assert!(!other.is_statistics_selections_changed(&state));

        let other = state.item_id_selected(4, ItemType::Domain);
        assert!(other.is_integration_selections_changed(&state));
        assert!(other.is_statistics_selections_changed(&state));
    }

    #[test]
    fn entering_statistics_reduces_the_chain_to_a_capable_platform() {
        let mut state = state_with_chains();
        state.view = View::Hippo;
        state.selected_platform_chains = vec![calculate_platform_chain_id(2, None, 1)];

        let next = state.set_new_view(View::StatAdvanced).unwrap();
        assert_eq!(
            next.selected_platform_chains,
            vec![calculate_platform_chain_id(1, None, 1)]
        );
        assert_eq!(next.view, View::StatAdvanced);
    }

    #[test]
    fn entering_statistics_falls_back_when_no_chain_end_is_capable() {
        let mut state = state_with_chains();
        state.view = View::Hippo;
        state.selected_platform_chains = vec![calculate_platform_chain_id(2, None, 2)];

        let next = state.set_new_view(View::StatSimple).unwrap();
        assert_eq!(
            next.selected_platform_chains,
            vec![calculate_platform_chain_id(1, None, 1)]
        );
    }

    #[test]
    fn bookmark_merge_keeps_absent_fields_and_resets_stat_dates() {
        let mut state = state_with_chains();
        state.view = View::Hippo;
        state.selected_producers = vec![11];
        state.stat_date_effective = "2019-05-01".into();
        state.stat_date_end = "2019-05-31".into();

        let bookmark = BookmarkInformation {
            consumers: Some(vec![5]),
            ..BookmarkInformation::default()
        };
        let next = state.apply_bookmark(View::StatSimple, &bookmark);
        assert_eq!(next.selected_consumers, vec![5]);
        assert_eq!(next.selected_producers, vec![11]);
        assert_eq!(next.stat_date_effective, state.default_stat_date_effective);
        assert_eq!(next.stat_date_end, state.default_stat_date_end);
        assert_eq!(next.view, View::StatSimple);
    }

    #[test]
    fn bookmark_divergence_resets_presets() {
        let mut state = state_with_chains();
        state.simple_view_preselect =
            preselect::simple_view_preselect("Journalen").unwrap();
        state.advanced_view_preselect =
            Some(preselect::advanced_view_preselect("Journalen").unwrap());
        state.selected_consumers = vec![865];

        let bookmark = BookmarkInformation {
            consumers: Some(vec![5]),
            ..BookmarkInformation::default()
        };
        let next = state.apply_bookmark(View::StatAdvanced, &bookmark);
        assert_eq!(next.advanced_view_preselect, None);
        assert_eq!(next.simple_view_preselect, preselect::simple_view_default());
    }
}
