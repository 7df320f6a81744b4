//! Host-side contracts for the Hippo state core.
//!
//! The runtime crate talks to its surroundings exclusively through the traits
//! defined here: [`DataLoader`] for backend reads and [`RouteNavigator`] for
//! URL synchronisation. Hosts supply real implementations; the bundled `Noop*`
//! and `Memory*` variants cover headless use and tests. The [`types`] module
//! holds the wire models both sides share.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod loader;
pub mod router;
pub mod types;

pub use loader::{
    DataLoader, DataLoaderFuture, LoadTarget, LoaderJournal, MemoryDataLoader, NoopDataLoader,
};
pub use router::{MemoryRouteNavigator, NoopRouteNavigator, RouteNavigator};
pub use types::{
    calculate_platform_chain_id, platform_chains_by_id, BaseDates, BaseItemsBundle, HistoryMap,
    Integration, LogicalAddress, MaxCounters, Platform, PlatformChain, ServiceComponent,
    ServiceContract, ServiceDomain, StatisticsBlob, StatisticsPlatform, StatisticsRow,
};
