//! Wire models shared by the runtime and its data-loader adapters.
//!
//! Every entity carries the backend's numeric id so selections, query
//! parameters, and bookmarks can all speak the same compact id language.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// A service component: an application that consumes or produces calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceComponent {
    /// Backend id.
    pub id: i32,
    /// HSA id identifying the component organisationally.
    pub hsa_id: String,
    /// Human-readable description.
    pub description: String,
}

/// A logical address a producer answers for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalAddress {
    /// Backend id.
    pub id: i32,
    /// The address string itself, usually an HSA id.
    pub address: String,
    /// Human-readable description.
    pub description: String,
}

/// A versioned service contract within a service domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceContract {
    /// Backend id.
    pub id: i32,
    /// Id of the domain the contract belongs to.
    pub service_domain_id: i32,
    /// Short contract name.
    pub name: String,
    /// Full contract namespace.
    pub namespace: String,
    /// Major version of the contract.
    pub major: i32,
}

/// A service domain grouping related contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDomain {
    /// Backend id.
    pub id: i32,
    /// Dot-separated domain name.
    pub domain_name: String,
}

/// An intermediary platform instance, for example `SLL-PROD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// Backend id.
    pub id: i32,
    /// Display name, environment suffix included.
    pub name: String,
}

/// A platform for which the backend can serve call statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsPlatform {
    /// Backend id, equal to the [`Platform`] id of the same platform.
    pub id: i32,
    /// Display name, environment suffix included.
    pub name: String,
}

/// A routing chain of one to three platforms a call passes through.
///
/// Chains have no backend id of their own; [`PlatformChain::id`] derives a
/// stable one from the hop ids, so the same triple always maps to the same
/// selectable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformChain {
    /// Platform the consumer calls.
    pub first: i32,
    /// Intermediate platform, absent for direct chains.
    pub middle: Option<i32>,
    /// Platform that reaches the producer.
    pub last: i32,
}

impl PlatformChain {
    /// The derived id of this chain.
    pub fn id(&self) -> i32 {
        calculate_platform_chain_id(self.first, self.middle, self.last)
    }
}

/// Derives the id of a platform chain from its hop ids.
///
/// Multiply-and-add fold with wrapping arithmetic; a missing middle hop
/// contributes zero, so one-hop and two-hop chains never collide with each
/// other by omission.
pub fn calculate_platform_chain_id(first: i32, middle: Option<i32>, last: i32) -> i32 {
    let mut id: i32 = 17;
    id = id.wrapping_mul(31).wrapping_add(first);
    id = id.wrapping_mul(31).wrapping_add(middle.unwrap_or(0));
    id.wrapping_mul(31).wrapping_add(last)
}

/// Indexes chains by their derived id.
pub fn platform_chains_by_id(chains: Vec<PlatformChain>) -> HashMap<i32, PlatformChain> {
    chains.into_iter().map(|chain| (chain.id(), chain)).collect()
}

/// One integration route: who may call what, where, and through which chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    /// First platform of the routing chain.
    pub first_tp_id: i32,
    /// Middle platform of the routing chain, if any.
    pub middle_tp_id: Option<i32>,
    /// Last platform of the routing chain.
    pub last_tp_id: i32,
    /// Logical address the route targets.
    pub logical_address_id: i32,
    /// Contract the route is registered for.
    pub service_contract_id: i32,
    /// Domain of that contract.
    pub service_domain_id: i32,
    /// Consumer component allowed to call.
    pub service_consumer_id: i32,
    /// Producer component answering.
    pub service_producer_id: i32,
}

/// Distinct-entity counts over a set of integrations.
///
/// The UI uses these as column totals, so they are recomputed whenever a new
/// integration list arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaxCounters {
    /// Distinct consumer components.
    pub consumers: usize,
    /// Distinct service contracts.
    pub contracts: usize,
    /// Distinct service domains.
    pub domains: usize,
    /// Distinct logical addresses.
    pub logical_addresses: usize,
    /// Distinct producer components.
    pub producers: usize,
    /// Distinct routing chains.
    pub platform_chains: usize,
}

impl MaxCounters {
    /// Counts the distinct entities referenced by `integrations`.
    pub fn from_integrations(integrations: &[Integration]) -> Self {
        let mut consumers = HashSet::new();
        let mut contracts = HashSet::new();
        let mut domains = HashSet::new();
        let mut logical_addresses = HashSet::new();
        let mut producers = HashSet::new();
        let mut chains = HashSet::new();
        for record in integrations {
            consumers.insert(record.service_consumer_id);
            contracts.insert(record.service_contract_id);
            domains.insert(record.service_domain_id);
            logical_addresses.insert(record.logical_address_id);
            producers.insert(record.service_producer_id);
            chains.insert((record.first_tp_id, record.middle_tp_id, record.last_tp_id));
        }
        Self {
            consumers: consumers.len(),
            contracts: contracts.len(),
            domains: domains.len(),
            logical_addresses: logical_addresses.len(),
            producers: producers.len(),
            platform_chains: chains.len(),
        }
    }
}

/// The dates for which the backend holds data, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseDates {
    /// Dates with integration snapshots, `yyyy-mm-dd`.
    pub integration_dates: Vec<String>,
    /// Dates with call statistics, `yyyy-mm-dd`.
    pub statistics_dates: Vec<String>,
}

/// All reference entities, indexed by id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseItemsBundle {
    /// Consumer and producer components.
    pub service_components: HashMap<i32, ServiceComponent>,
    /// Logical addresses.
    pub logical_addresses: HashMap<i32, LogicalAddress>,
    /// Service contracts.
    pub service_contracts: HashMap<i32, ServiceContract>,
    /// Service domains.
    pub service_domains: HashMap<i32, ServiceDomain>,
    /// Known platforms.
    pub platforms: HashMap<i32, Platform>,
    /// Known routing chains, keyed by derived chain id.
    pub platform_chains: HashMap<i32, PlatformChain>,
    /// Platforms with statistics coverage.
    pub statistics_platforms: HashMap<i32, StatisticsPlatform>,
}

/// One aggregated statistics row: calls for a (consumer, contract, logical
/// address, producer) combination over the requested period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsRow {
    /// Consumer component id.
    pub consumer_id: i32,
    /// Service contract id.
    pub contract_id: i32,
    /// Logical address id.
    pub logical_address_id: i32,
    /// Producer component id.
    pub producer_id: i32,
    /// Number of calls.
    pub calls: i64,
}

/// Call statistics for one period and platform pair.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatisticsBlob {
    /// The aggregated rows.
    pub rows: Vec<StatisticsRow>,
}

impl StatisticsBlob {
    /// Total calls across all rows.
    pub fn total_calls(&self) -> i64 {
        self.rows.iter().map(|row| row.calls).sum()
    }
}

/// Calls per date, `yyyy-mm-dd` keys, as served by the history endpoint.
pub type HistoryMap = HashMap<String, i64>;
