//! The operation facade the render layers call into.
//!
//! Every operation follows commit-then-navigate: dispatch through the store,
//! then re-encode the committed state into the URL. The URL is derived output
//! here, never an input; browser-initiated URL changes come back in through
//! [`HippoManager::new_or_updated_url_from_browser`].

use leptos::logging;

use crate::bookmark::{create_bookmark_string, parse_bookmark_string};
use crate::loads;
use crate::model::{DateType, ItemType, View};
use crate::preselect;
use crate::reactor;
use crate::reducer::{HippoAction, HippoError};
use crate::store::{HippoHostContext, HippoStore};

/// Entry point for everything the application can do.
#[derive(Clone, Copy)]
pub struct HippoManager {
    store: HippoStore,
}

impl HippoManager {
    /// Creates the manager and its store. Must run inside a reactive runtime.
    pub fn new(host: HippoHostContext) -> Self {
        Self {
            store: HippoStore::new(host),
        }
    }

    /// The underlying store; render layers subscribe to its state signal.
    pub fn store(&self) -> HippoStore {
        self.store
    }

    /// Boots the application: applies the startup URL, installs the reactor,
    /// and starts the base loads.
    pub fn initialize(&self) {
        let href = self.store.host().route_navigator().current_href();
        let view = View::from_href(&href);
        let bookmark = parse_bookmark_string(&href);
        self.store
            .dispatch_logged(HippoAction::ApplyBookmark { view, bookmark });
        reactor::install(self.store);
        loads::spawn_base_loads(self.store);
        loads::pump();
    }

    /// Adds `id` to the selection for `item_type`.
    pub fn item_selected(&self, id: i32, item_type: ItemType) {
        self.store
            .dispatch_logged(HippoAction::ItemIdSelected { item_type, id });
        self.navigate_with_bookmark();
    }

    /// Removes `id` from the selection for `item_type`.
    pub fn item_deselected(&self, id: i32, item_type: ItemType) {
        self.store
            .dispatch_logged(HippoAction::ItemIdDeselected { item_type, id });
        self.navigate_with_bookmark();
    }

    /// Selects or deselects `id` depending on its current membership.
    pub fn item_select_deselect(&self, id: i32, item_type: ItemType) {
        if self.store.current().is_item_selected(id, item_type) {
            self.item_deselected(id, item_type);
        } else {
            self.item_selected(id, item_type);
        }
    }

    /// Sets the date field addressed by `date_type`.
    pub fn date_selected(&self, date_type: DateType, date: &str) {
        self.store.dispatch_logged(HippoAction::DateSelected {
            date_type,
            date: date.to_string(),
        });
        self.navigate_with_bookmark();
    }

    /// Selects `platform_id` as the statistics platform.
    pub fn stat_tp_selected(&self, platform_id: i32) {
        self.store
            .dispatch_logged(HippoAction::StatTpSelected(platform_id));
        self.navigate_with_bookmark();
    }

    /// Switches to `view`.
    ///
    /// # Errors
    /// [`HippoError::SameViewRequested`] when `view` is already active.
    pub fn set_view(&self, view: View) -> Result<(), HippoError> {
        self.store.dispatch(HippoAction::SetView(view))?;
        self.navigate_with_bookmark();
        Ok(())
    }

    /// Activates the preset named `label` in the active statistics view mode
    /// and starts a statistics load right away rather than waiting for the
    /// reactor.
    ///
    /// # Errors
    /// [`HippoError::UnknownPreselect`] when the active catalog has no preset
    /// with that label.
    pub fn stat_set_view_mode_preselect(&self, label: &str) -> Result<(), HippoError> {
        let action = match self.store.current().view {
            View::StatAdvanced => {
                let preset = preselect::advanced_view_preselect(label)
                    .ok_or_else(|| HippoError::UnknownPreselect(label.to_string()))?;
                HippoAction::SetAdvancedViewPreselect(preset)
            }
            _ => {
                let preset = preselect::simple_view_preselect(label)
                    .ok_or_else(|| HippoError::UnknownPreselect(label.to_string()))?;
                HippoAction::SetSimpleViewPreselect(preset)
            }
        };
        self.store.dispatch(action)?;
        loads::spawn_statistics_load(self.store);
        loads::pump();
        self.navigate_with_bookmark();
        Ok(())
    }

    /// Shows or hides the history time graph; showing it starts a history
    /// load.
    pub fn stat_history_selected(&self, show: bool) {
        self.store.dispatch_logged(HippoAction::ShowTimeGraph(show));
        if show {
            loads::spawn_history_load(self.store);
            loads::pump();
        }
        self.navigate_with_bookmark();
    }

    /// Shows technical names instead of descriptions.
    pub fn stat_technical_terms_selected(&self, show: bool) {
        self.store
            .dispatch_logged(HippoAction::ShowTechnicalTerms(show));
        self.navigate_with_bookmark();
    }

    /// Changes the row limit of one item column.
    pub fn set_view_max(&self, item_type: ItemType, max: usize) {
        self.store
            .dispatch_logged(HippoAction::SetVMax { item_type, max });
        self.navigate_with_bookmark();
    }

    /// Applies a browser-initiated location change: back and forward moves,
    /// manually edited links, and the startup redirect all arrive here.
    /// `params` is the router-captured filter segment; `None` falls back to
    /// the full href.
    pub fn new_or_updated_url_from_browser(&self, view: View, params: Option<&str>) {
        let navigator = self.store.host().route_navigator();
        let raw = match params {
            Some(params) => params.to_string(),
            None => navigator.current_href(),
        };
        let bookmark = parse_bookmark_string(&raw);
        logging::log!(
            "url update for {view:?}: {}",
            serde_json::to_string(&bookmark).unwrap_or_default()
        );
        self.store
            .dispatch_logged(HippoAction::ApplyBookmark { view, bookmark });
        if view == View::Home {
            navigator.navigate(View::Hippo.path());
        }
    }

    /// Re-encodes the committed state into a route and navigates there.
    fn navigate_with_bookmark(&self) {
        let state = self.store.current();
        let bookmark = create_bookmark_string(&state);
        let route = if bookmark.is_empty() {
            state.view.path().to_string()
        } else {
            format!("{}/filter={}", state.view.path(), bookmark)
        };
        self.store.host().route_navigator().navigate(&route);
    }
}
