//! End-to-end flows over a real store, reactor, and in-memory host services.

use std::collections::HashMap;
use std::rc::Rc;

use hippo_host::types::{
    calculate_platform_chain_id, platform_chains_by_id, BaseDates, BaseItemsBundle, Integration,
    Platform, PlatformChain, StatisticsBlob, StatisticsPlatform, StatisticsRow,
};
use hippo_host::{LoadTarget, MemoryDataLoader, MemoryRouteNavigator};
use hippo_runtime::{
    AsyncActionStatus, HippoError, HippoHostContext, HippoManager, ItemType, View,
};
use leptos::create_runtime;
use pretty_assertions::assert_eq;

const SLL_PROD_ID: i32 = 1;
const NTJP_PROD_ID: i32 = 2;

fn base_items() -> BaseItemsBundle {
    let mut bundle = BaseItemsBundle::default();
    for (id, name) in [(SLL_PROD_ID, "SLL-PROD"), (NTJP_PROD_ID, "NTJP-PROD")] {
        bundle.platforms.insert(
            id,
            Platform {
                id,
                name: name.into(),
            },
        );
    }
    bundle.statistics_platforms.insert(
        SLL_PROD_ID,
        StatisticsPlatform {
            id: SLL_PROD_ID,
            name: "SLL-PROD".into(),
        },
    );
    bundle.platform_chains = platform_chains_by_id(vec![
        PlatformChain {
            first: SLL_PROD_ID,
            middle: None,
            last: SLL_PROD_ID,
        },
        PlatformChain {
            first: NTJP_PROD_ID,
            middle: None,
            last: SLL_PROD_ID,
        },
    ]);
    bundle
}

fn fixture_loader() -> MemoryDataLoader {
    MemoryDataLoader::new()
        .with_base_dates(BaseDates {
            integration_dates: vec!["2021-01-01".into(), "2021-02-01".into()],
            statistics_dates: vec!["2020-06-30".into(), "2020-07-31".into()],
        })
        .with_base_items(base_items())
        .with_integrations(vec![Integration {
            first_tp_id: NTJP_PROD_ID,
            middle_tp_id: None,
            last_tp_id: SLL_PROD_ID,
            logical_address_id: 10,
            service_contract_id: 379,
            service_domain_id: 3,
            service_consumer_id: 5,
            service_producer_id: 11,
        }])
        .with_statistics(StatisticsBlob {
            rows: vec![StatisticsRow {
                consumer_id: 5,
                contract_id: 379,
                logical_address_id: 10,
                producer_id: 11,
                calls: 17_000,
            }],
        })
        .with_history(HashMap::from([
            ("2020-07-01".to_string(), 530_i64),
            ("2020-07-02".to_string(), 610_i64),
        ]))
}

fn booted_manager(href: &str) -> (HippoManager, MemoryDataLoader, MemoryRouteNavigator) {
    let loader = fixture_loader();
    let navigator = MemoryRouteNavigator::new(href);
    let manager = HippoManager::new(HippoHostContext::new(
        Rc::new(loader.clone()),
        Rc::new(navigator.clone()),
    ));
    manager.initialize();
    (manager, loader, navigator)
}

#[test]
fn startup_url_restores_filters_and_loads_the_integration_view() {
    let runtime = create_runtime();
    let (manager, loader, _navigator) =
        booted_manager("https://hippo.example/#/hippo/filter=c5,9!d3");

    let state = manager.store().current();
    assert_eq!(state.view, View::Hippo);
    assert_eq!(state.selected_consumers, vec![5, 9]);
    assert_eq!(state.selected_domains, vec![3]);
    assert_eq!(
        state.download_base_dates_status,
        AsyncActionStatus::Completed
    );
    assert_eq!(state.download_base_item_status, AsyncActionStatus::Completed);
    assert_eq!(
        state.download_integration_status,
        AsyncActionStatus::Completed
    );
    // The integration period defaults to the newest snapshot date.
    assert_eq!(state.date_effective.as_deref(), Some("2021-02-01"));
    assert_eq!(state.date_end.as_deref(), Some("2021-02-01"));
    assert_eq!(state.integrations.len(), 1);
    assert_eq!(state.max_counters.consumers, 1);

    let journal = loader.journal();
    assert_eq!(journal.base_dates_calls, 1);
    assert_eq!(journal.base_items_calls, 1);
    assert_eq!(journal.integration_calls, 1);
    let params = journal.last_integration_params.unwrap_or_default();
    assert!(params.contains("&dateEffective=2021-02-01"));
    assert!(params.contains("&consumerId=5,9"));
    assert!(params.contains("&domainId=3"));
    runtime.dispose();
}

#[test]
fn statistics_startup_selects_the_fallback_platform_and_loads_once() {
    let runtime = create_runtime();
    let (manager, loader, _navigator) =
        booted_manager("https://hippo.example/#/stat-advanced/filter=S2020-07-01!E2020-07-31!t379");

    let state = manager.store().current();
    assert_eq!(state.view, View::StatAdvanced);
    assert_eq!(state.stat_date_effective, "2020-07-01");
    assert_eq!(state.stat_date_end, "2020-07-31");
    assert_eq!(state.selected_contracts, vec![379]);
    // No platform in the bookmark: the reactor picked the fallback.
    assert_eq!(
        state.selected_platform_chains,
        vec![calculate_platform_chain_id(SLL_PROD_ID, None, SLL_PROD_ID)]
    );
    assert_eq!(
        state.download_statistics_status,
        AsyncActionStatus::Completed
    );
    assert_eq!(state.statistics_blob.total_calls(), 17_000);

    let journal = loader.journal();
    assert_eq!(journal.statistics_calls, 1);
    let params = journal.last_statistics_params.unwrap_or_default();
    assert!(params.contains("&dateEffective=2020-07-01"));
    assert!(params.contains("&dateEnd=2020-07-31"));
    assert!(params.contains("&contractId=379"));
    assert!(params.contains(&format!("&firstPlattformId={SLL_PROD_ID}")));
    assert!(params.contains(&format!("&lastPlattformId={SLL_PROD_ID}")));
    runtime.dispose();
}

#[test]
fn stale_statistics_end_date_advances_before_loading() {
    let runtime = create_runtime();
    let (manager, loader, _navigator) =
        booted_manager("https://hippo.example/#/stat-simple/filter=S2020-06-01!E2020-06-15");

    let state = manager.store().current();
    assert_eq!(state.view, View::StatSimple);
    assert_eq!(state.stat_date_effective, "2020-06-01");
    // 2020-06-15 has no data; the end date moved to the newest date that has.
    assert_eq!(state.stat_date_end, "2020-07-31");
    assert_eq!(
        state.download_statistics_status,
        AsyncActionStatus::Completed
    );

    let params = loader.journal().last_statistics_params.unwrap_or_default();
    assert!(params.contains("&dateEffective=2020-06-01"));
    assert!(params.contains("&dateEnd=2020-07-31"));
    runtime.dispose();
}

#[test]
fn selection_changes_reload_integrations_and_update_the_url() {
    let runtime = create_runtime();
    let (manager, loader, navigator) = booted_manager("https://hippo.example/#/hippo");

    manager.item_selected(42, ItemType::Consumer);

    assert_eq!(loader.journal().integration_calls, 2);
    let params = loader.journal().last_integration_params.unwrap_or_default();
    assert!(params.contains("&consumerId=42"));
    assert_eq!(
        navigator.last_navigation().as_deref(),
        Some("/hippo/filter=S2021-02-01!E2021-02-01!c42")
    );

    // Toggling the same id off again goes through the deselect path.
    manager.item_select_deselect(42, ItemType::Consumer);
    assert_eq!(loader.journal().integration_calls, 3);
    assert!(manager.store().current().selected_consumers.is_empty());
    assert_eq!(
        navigator.last_navigation().as_deref(),
        Some("/hippo/filter=S2021-02-01!E2021-02-01")
    );
    runtime.dispose();
}

#[test]
fn reselecting_the_same_item_does_not_reload() {
    let runtime = create_runtime();
    let (manager, loader, _navigator) = booted_manager("https://hippo.example/#/hippo/filter=c5");

    assert_eq!(loader.journal().integration_calls, 1);
    manager.item_selected(5, ItemType::Consumer);
    assert_eq!(loader.journal().integration_calls, 1);
    assert_eq!(manager.store().current().selected_consumers, vec![5]);
    runtime.dispose();
}

#[test]
fn switching_views_carries_the_platform_into_statistics() {
    let runtime = create_runtime();
    let (manager, loader, navigator) = booted_manager("https://hippo.example/#/hippo");

    // Select the two-hop chain in the integration view, then enter statistics.
    let chain_id = calculate_platform_chain_id(NTJP_PROD_ID, None, SLL_PROD_ID);
    manager.item_selected(chain_id, ItemType::PlatformChain);
    manager.set_view(View::StatAdvanced).unwrap();

    let state = manager.store().current();
    assert_eq!(state.view, View::StatAdvanced);
    assert_eq!(
        state.selected_platform_chains,
        vec![calculate_platform_chain_id(SLL_PROD_ID, None, SLL_PROD_ID)]
    );
    assert_eq!(loader.journal().statistics_calls, 1);
    assert!(navigator
        .last_navigation()
        .unwrap_or_default()
        .starts_with("/stat-advanced/filter="));
    runtime.dispose();
}

#[test]
fn switching_to_the_active_view_fails_without_navigating() {
    let runtime = create_runtime();
    let (manager, _loader, navigator) = booted_manager("https://hippo.example/#/hippo");
    let navigations_before = navigator.navigations().len();

    assert_eq!(
        manager.set_view(View::Hippo),
        Err(HippoError::SameViewRequested(View::Hippo))
    );
    assert_eq!(navigator.navigations().len(), navigations_before);
    runtime.dispose();
}

#[test]
fn preset_activation_applies_selections_and_reloads_statistics() {
    let runtime = create_runtime();
    let (manager, loader, _navigator) =
        booted_manager("https://hippo.example/#/stat-simple/filter=S2020-07-01!E2020-07-31");

    assert_eq!(loader.journal().statistics_calls, 1);

    manager.stat_set_view_mode_preselect("Journalen").unwrap();
    let state = manager.store().current();
    assert_eq!(state.simple_view_preselect.label, "Journalen");
    assert_eq!(state.selected_consumers, vec![865]);
    assert_eq!(loader.journal().statistics_calls, 2);
    let params = loader.journal().last_statistics_params.unwrap_or_default();
    assert!(params.contains("&consumerId=865"));

    assert_eq!(
        manager.stat_set_view_mode_preselect("Okänd vy"),
        Err(HippoError::UnknownPreselect("Okänd vy".into()))
    );
    runtime.dispose();
}

#[test]
fn history_graph_toggle_loads_history_on_demand() {
    let runtime = create_runtime();
    let (manager, loader, _navigator) =
        booted_manager("https://hippo.example/#/stat-advanced/filter=S2020-07-01!E2020-07-31");

    assert_eq!(loader.journal().history_calls, 0);
    manager.stat_history_selected(true);

    let state = manager.store().current();
    assert!(state.show_time_graph);
    assert_eq!(state.download_history_status, AsyncActionStatus::Completed);
    assert_eq!(state.history_map.get("2020-07-01"), Some(&530));
    assert_eq!(loader.journal().history_calls, 1);

    // Hiding and showing again reuses the loaded data.
    manager.stat_history_selected(false);
    manager.stat_history_selected(true);
    assert_eq!(loader.journal().history_calls, 1);
    runtime.dispose();
}

#[test]
fn browser_url_updates_apply_filters_and_reload() {
    let runtime = create_runtime();
    let (manager, loader, navigator) = booted_manager("https://hippo.example/#/hippo/filter=c5");

    assert_eq!(loader.journal().integration_calls, 1);

    // A back/forward move lands on a different filter.
    navigator.set_href("https://hippo.example/#/hippo/filter=c7");
    manager.new_or_updated_url_from_browser(View::Hippo, Some("filter=c7"));

    let state = manager.store().current();
    assert_eq!(state.selected_consumers, vec![7]);
    assert_eq!(loader.journal().integration_calls, 2);
    let params = loader.journal().last_integration_params.unwrap_or_default();
    assert!(params.contains("&consumerId=7"));

    // Replaying the same filter changes nothing and loads nothing.
    manager.new_or_updated_url_from_browser(View::Hippo, Some("filter=c7"));
    assert_eq!(loader.journal().integration_calls, 2);
    runtime.dispose();
}

#[test]
fn the_home_view_redirects_to_the_integration_view() {
    let runtime = create_runtime();
    let (manager, _loader, navigator) = booted_manager("https://hippo.example/#/");

    manager.new_or_updated_url_from_browser(View::Home, None);
    assert_eq!(navigator.last_navigation().as_deref(), Some("/hippo"));
    runtime.dispose();
}

#[test]
fn failed_integration_load_reports_the_error() {
    let runtime = create_runtime();
    let loader = fixture_loader().with_failure(LoadTarget::Integrations);
    let navigator = MemoryRouteNavigator::new("https://hippo.example/#/hippo");
    let manager = HippoManager::new(HippoHostContext::new(
        Rc::new(loader.clone()),
        Rc::new(navigator),
    ));
    manager.initialize();

    let state = manager.store().current();
    assert_eq!(state.download_base_item_status, AsyncActionStatus::Completed);
    assert_eq!(state.download_integration_status, AsyncActionStatus::Error);
    assert!(state
        .error_message
        .as_deref()
        .unwrap_or_default()
        .contains("integrations"));
    runtime.dispose();
}
