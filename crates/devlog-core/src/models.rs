use std::collections::BTreeMap;

// ── DeviceStats ───────────────────────────────────────────────────────────────

/// Per-device accumulator built while scanning one log file.
///
/// Timestamps are opaque `"<date> <time>"` strings. "First" and "last" refer
/// to input line order, never to chronological comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceStats {
    /// Number of log lines attributed to this device.
    pub count: u64,
    /// Timestamp of the first line seen for this device.
    pub first_timestamp: Option<String>,
    /// Timestamp of the most recent line seen for this device.
    pub last_timestamp: Option<String>,
}

impl DeviceStats {
    /// Record one more log line carrying `timestamp`.
    pub fn record(&mut self, timestamp: &str) {
        self.count += 1;
        if self.first_timestamp.is_none() {
            self.first_timestamp = Some(timestamp.to_string());
        }
        self.last_timestamp = Some(timestamp.to_string());
    }
}

// ── DeviceStatsTable ──────────────────────────────────────────────────────────

/// Device identifier → [`DeviceStats`] for one log source.
///
/// Keys are case-sensitive. Iteration yields devices in ascending
/// lexicographic order of identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceStatsTable {
    devices: BTreeMap<String, DeviceStats>,
}

impl DeviceStatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the entry for `device`, inserting zeroed stats on first access.
    pub fn get_or_insert_default(&mut self, device: &str) -> &mut DeviceStats {
        self.devices.entry(device.to_string()).or_default()
    }

    /// Attribute one log line at `timestamp` to `device`.
    pub fn record(&mut self, device: &str, timestamp: &str) {
        self.get_or_insert_default(device).record(timestamp);
    }

    pub fn get(&self, device: &str) -> Option<&DeviceStats> {
        self.devices.get(device)
    }

    /// Devices sorted by identifier.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeviceStats)> {
        self.devices.iter().map(|(name, stats)| (name.as_str(), stats))
    }

    /// Number of distinct devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Sum of `count` across all devices.
    pub fn total_entries(&self) -> u64 {
        self.devices.values().map(|s| s.count).sum()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_stats_default_is_empty() {
        let stats = DeviceStats::default();
        assert_eq!(stats.count, 0);
        assert!(stats.first_timestamp.is_none());
        assert!(stats.last_timestamp.is_none());
    }

    #[test]
    fn test_device_stats_record_sets_first_once() {
        let mut stats = DeviceStats::default();
        stats.record("2024-01-01 08:00:00");
        stats.record("2024-01-01 09:00:00");
        stats.record("2024-01-01 07:00:00");

        assert_eq!(stats.count, 3);
        assert_eq!(stats.first_timestamp.as_deref(), Some("2024-01-01 08:00:00"));
        // Last is by input order, not by comparison.
        assert_eq!(stats.last_timestamp.as_deref(), Some("2024-01-01 07:00:00"));
    }

    #[test]
    fn test_get_or_insert_default_creates_once() {
        let mut table = DeviceStatsTable::new();
        table.get_or_insert_default("PUMP-A").count = 5;
        let again = table.get_or_insert_default("PUMP-A");
        assert_eq!(again.count, 5);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_keys_are_case_sensitive() {
        let mut table = DeviceStatsTable::new();
        table.record("pump-a", "2024-01-01 08:00:00");
        table.record("PUMP-A", "2024-01-01 08:00:00");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_table_iterates_in_lexicographic_order() {
        let mut table = DeviceStatsTable::new();
        for name in ["VENT-2", "PUMP-B", "MONITOR-10", "PUMP-A", "MONITOR-9"] {
            table.record(name, "2024-01-01 08:00:00");
        }
        let names: Vec<&str> = table.iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec!["MONITOR-10", "MONITOR-9", "PUMP-A", "PUMP-B", "VENT-2"]
        );
    }

    #[test]
    fn test_table_total_entries() {
        let mut table = DeviceStatsTable::new();
        table.record("PUMP-A", "2024-01-01 08:00:00");
        table.record("PUMP-B", "2024-01-01 08:05:00");
        table.record("PUMP-A", "2024-01-01 09:00:00");
        assert_eq!(table.total_entries(), 3);
        assert_eq!(table.get("PUMP-A").map(|s| s.count), Some(2));
    }

    #[test]
    fn test_empty_table() {
        let table = DeviceStatsTable::new();
        assert!(table.is_empty());
        assert_eq!(table.total_entries(), 0);
        assert!(table.get("PUMP-A").is_none());
    }
}
