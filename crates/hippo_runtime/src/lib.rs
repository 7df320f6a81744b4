//! State core of the Hippo dashboard: one immutable state value, a pure
//! reducer over typed actions, a level-triggered reactor for loads, and a
//! bookmark codec that keeps the URL and the state interchangeable.

pub mod bookmark;
pub mod dates;
mod loads;
pub mod manager;
pub mod model;
pub mod preselect;
pub mod reactor;
pub mod reducer;
pub mod store;

pub use bookmark::{create_bookmark_string, parse_bookmark_string, BookmarkInformation};
pub use manager::HippoManager;
pub use model::{
    initialize_hippo_state, AsyncActionStatus, DateType, HippoState, ItemType, View,
    FALLBACK_STAT_PLATFORM,
};
pub use preselect::{
    advanced_view_default, advanced_view_preselect, simple_view_default, simple_view_preselect,
    FilteredItems, ViewPreselect, ADVANCED_VIEW_PRESELECTS, SIMPLE_VIEW_PRESELECTS,
};
pub use reactor::StateEffect;
pub use reducer::{reduce, HippoAction, HippoError};
pub use store::{HippoHostContext, HippoStore};
