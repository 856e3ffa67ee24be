use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

pub const TARGET_STORE: &str = "store";
pub const TARGET_UPSTREAM: &str = "upstream";

pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// One recorded operation timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: String, // "list" | "get" | "create" | "update" | "delete" | "barcode" | "search" | ...
    pub target: String,    // "store" | "upstream"
    pub duration_ns: u64,
    pub item_count: usize,
    pub success: bool,
}

impl MetricEntry {
    pub fn new(
        operation: impl Into<String>,
        target: impl Into<String>,
        elapsed: Duration,
        item_count: usize,
        success: bool,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: operation.into(),
            target: target.into(),
            duration_ns: elapsed.as_nanos() as u64,
            item_count,
            success,
        }
    }
}

/// Rolling log of the most recent timings.
///
/// Holds at most `max_entries`; recording past the cap evicts the oldest
/// entry, so memory stays flat under steady traffic.
#[derive(Debug)]
pub struct MetricsStore {
    entries: VecDeque<MetricEntry>,
    max_entries: usize,
    evicted: u64,
}

impl Default for MetricsStore {
    fn default() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }
}

impl MetricsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::with_capacity(max_entries.min(DEFAULT_MAX_ENTRIES)),
            max_entries,
            evicted: 0,
        }
    }

    pub fn record(&mut self, entry: MetricEntry) {
        if self.entries.len() == self.max_entries {
            self.entries.pop_front();
            self.evicted += 1;
        }
        self.entries.push_back(entry);
    }

    pub fn record_store(&mut self, operation: &str, elapsed: Duration, item_count: usize, success: bool) {
        self.record(MetricEntry::new(operation, TARGET_STORE, elapsed, item_count, success));
    }

    pub fn record_upstream(&mut self, operation: &str, elapsed: Duration, item_count: usize, success: bool) {
        self.record(MetricEntry::new(operation, TARGET_UPSTREAM, elapsed, item_count, success));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Entries dropped to respect the cap since the last `clear`.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.evicted = 0;
    }

    /// Stats per (operation, target) over the retained window, sorted by key.
    pub fn aggregated(&self) -> Vec<AggregatedMetric> {
        let mut groups: BTreeMap<(&str, &str), Vec<u64>> = BTreeMap::new();
        for e in &self.entries {
            groups
                .entry((e.operation.as_str(), e.target.as_str()))
                .or_default()
                .push(e.duration_ns);
        }

        groups
            .into_iter()
            .map(|((operation, target), mut samples)| {
                samples.sort_unstable();
                AggregatedMetric::from_sorted(operation, target, &samples)
            })
            .collect()
    }

    /// The retained window as CSV, oldest entry first.
    pub fn to_csv(&self) -> anyhow::Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for e in &self.entries {
            wtr.serialize(CsvRow {
                timestamp: e.timestamp.to_rfc3339(),
                operation: &e.operation,
                target: &e.target,
                duration_ns: e.duration_ns,
                duration_ms: format!("{:.6}", e.duration_ns as f64 / 1_000_000.0),
                item_count: e.item_count,
                success: e.success,
            })?;
        }

        let data = wtr.into_inner()?;
        Ok(String::from_utf8(data)?)
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    timestamp: String,
    operation: &'a str,
    target: &'a str,
    duration_ns: u64,
    duration_ms: String,
    item_count: usize,
    success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedMetric {
    pub operation: String,
    pub target: String,
    pub sample_count: usize,
    pub min_ns: u64,
    pub max_ns: u64,
    pub avg_ns: u64,
    pub p50_ns: u64,
    pub p95_ns: u64,
    pub p99_ns: u64,
    pub avg_ms: f64,
    pub p95_ms: f64,
}

impl AggregatedMetric {
    /// `sorted` must be non-empty and ascending.
    fn from_sorted(operation: &str, target: &str, sorted: &[u64]) -> Self {
        let count = sorted.len();
        let percentile = |q: f64| sorted[((count as f64 * q) as usize).min(count - 1)];
        let avg_ns = sorted.iter().sum::<u64>() / count as u64;
        let p95_ns = percentile(0.95);

        Self {
            operation: operation.to_string(),
            target: target.to_string(),
            sample_count: count,
            min_ns: sorted[0],
            max_ns: sorted[count - 1],
            avg_ns,
            p50_ns: percentile(0.50),
            p95_ns,
            p99_ns: percentile(0.99),
            avg_ms: avg_ns as f64 / 1_000_000.0,
            p95_ms: p95_ns as f64 / 1_000_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns(n: u64) -> Duration {
        Duration::from_nanos(n)
    }

    #[test]
    fn aggregates_per_operation_and_target() {
        let mut store = MetricsStore::new();
        store.record_store("get", ns(100), 1, true);
        store.record_store("get", ns(300), 1, true);
        store.record_upstream("barcode", ns(5_000), 1, false);

        let agg = store.aggregated();
        assert_eq!(agg.len(), 2);
        // sorted by operation name
        assert_eq!(agg[0].operation, "barcode");
        assert_eq!(agg[0].target, TARGET_UPSTREAM);
        assert_eq!(agg[1].operation, "get");
        assert_eq!(agg[1].sample_count, 2);
        assert_eq!(agg[1].min_ns, 100);
        assert_eq!(agg[1].max_ns, 300);
        assert_eq!(agg[1].avg_ns, 200);
    }

    #[test]
    fn empty_store_aggregates_to_nothing() {
        assert!(MetricsStore::new().aggregated().is_empty());
    }

    #[test]
    fn cap_evicts_oldest_entries() {
        let mut store = MetricsStore::with_max_entries(3);
        for n in 1..=5 {
            store.record_store("get", ns(n), 1, true);
        }
        assert_eq!(store.len(), 3);
        assert_eq!(store.evicted(), 2);

        let agg = store.aggregated();
        assert_eq!(agg[0].sample_count, 3);
        assert_eq!(agg[0].min_ns, 3, "the two oldest samples must be gone");
        assert_eq!(agg[0].max_ns, 5);
    }

    #[test]
    fn cap_holds_under_sustained_traffic() {
        let mut store = MetricsStore::with_max_entries(100);
        for _ in 0..20_000 {
            store.record_store("list", ns(10), 3, true);
        }
        assert_eq!(store.len(), 100);
        assert_eq!(store.evicted(), 19_900);
    }

    #[test]
    fn zero_cap_still_keeps_latest_entry() {
        let mut store = MetricsStore::with_max_entries(0);
        store.record_store("get", ns(1), 1, true);
        store.record_store("get", ns(2), 1, true);
        assert_eq!(store.max_entries(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn csv_has_header_plus_one_row_per_entry() {
        let mut store = MetricsStore::new();
        store.record_store("create", ns(1_500), 1, true);
        store.record_store("delete", ns(900), 0, false);
        let csv = store.to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "timestamp,operation,target,duration_ns,duration_ms,item_count,success"
        );
        assert!(lines[2].contains(",delete,store,900,0.000900,0,false"));
    }

    #[test]
    fn clear_drops_entries_and_eviction_count() {
        let mut store = MetricsStore::with_max_entries(1);
        store.record_store("list", ns(10), 3, true);
        store.record_store("list", ns(10), 3, true);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.evicted(), 0);
    }
}
