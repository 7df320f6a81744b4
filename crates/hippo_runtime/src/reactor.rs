//! Level-triggered reaction to committed state transitions.
//!
//! After every commit the full rule set is evaluated against the new state;
//! whatever the state still calls for is (re)issued. Load effects stay
//! harmless to repeat because the load functions themselves check the
//! download status before fetching.

use leptos::{create_effect, logging, SignalGet};

use crate::loads;
use crate::model::{AsyncActionStatus, DateType, HippoState, View, FALLBACK_STAT_PLATFORM};
use crate::reducer::HippoAction;
use crate::store::HippoStore;

/// Work a state snapshot calls for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEffect {
    /// Fetch integrations for the integration view.
    LoadIntegrations,
    /// Fetch statistics for the current filter.
    LoadStatistics,
    /// Move the statistics end date to the newest date with data.
    AdvanceStatEndDate(String),
    /// No platform is selected; pick the fallback platform.
    SelectDefaultStatPlatform,
}

/// Evaluates every rule against `state` and returns the effects it calls for.
pub fn evaluate(state: &HippoState) -> Vec<StateEffect> {
    let mut effects = Vec::new();

    if state.view == View::Hippo
        && state.download_integration_status == AsyncActionStatus::NotInitialized
        && state.download_base_dates_status == AsyncActionStatus::Completed
    {
        effects.push(StateEffect::LoadIntegrations);
    }

    if state.view.is_statistics() {
        let stale_end = state
            .statistics_dates
            .last()
            .filter(|newest| **newest != state.stat_date_end);
        if let Some(newest) = stale_end {
            // Correct the period first; the statistics load follows on the
            // commit that results.
            effects.push(StateEffect::AdvanceStatEndDate(newest.clone()));
        } else if state.download_statistics_status == AsyncActionStatus::NotInitialized
            && state.download_base_item_status == AsyncActionStatus::Completed
        {
            if state.is_stat_platform_selected() {
                effects.push(StateEffect::LoadStatistics);
            } else {
                effects.push(StateEffect::SelectDefaultStatPlatform);
            }
        }
    }

    effects
}

/// Installs the reactor on `store`: every state commit re-evaluates the rules
/// and runs the resulting effects.
///
/// Effects never touch the state from inside the subscription itself; the
/// dispatching ones run as spawned tasks, after the commit that triggered
/// them has finished notifying.
pub fn install(store: HippoStore) {
    create_effect(move |_| {
        let state = store.state.get();
        for effect in evaluate(&state) {
            run_effect(store, effect);
        }
    });
}

fn run_effect(store: HippoStore, effect: StateEffect) {
    match effect {
        StateEffect::LoadIntegrations => loads::spawn_integration_load(store),
        StateEffect::LoadStatistics => loads::spawn_statistics_load(store),
        StateEffect::AdvanceStatEndDate(date) => {
            loads::spawn_load(async move {
                store.dispatch_logged(HippoAction::DateSelected {
                    date_type: DateType::StatEnd,
                    date,
                });
            });
        }
        StateEffect::SelectDefaultStatPlatform => {
            loads::spawn_load(async move {
                match store.current().platform_id_by_name(FALLBACK_STAT_PLATFORM) {
                    Some(platform_id) => {
                        store.dispatch_logged(HippoAction::StatTpSelected(platform_id));
                    }
                    None => logging::warn!(
                        "fallback statistics platform {FALLBACK_STAT_PLATFORM} is not among the loaded platforms"
                    ),
                }
            });
        }
    }
}
