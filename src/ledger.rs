//! Per-domain availability accounting

use crate::classifier::Health;
use crate::errors::{MonitorError, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Cumulative check counters for one domain. `up <= total` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DomainCounters {
    pub up: u64,
    pub total: u64,
}

impl DomainCounters {
    /// Availability rounded to the nearest whole percent, halves rounding up
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((200 * self.up + self.total) / (2 * self.total)) as u8
    }
}

/// Availability counters keyed by domain
#[derive(Debug, Default)]
pub struct AvailabilityLedger {
    domains: HashMap<String, DomainCounters>,
}

impl AvailabilityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one check result for `domain`
    pub fn record(&mut self, domain: &str, health: Health) {
        let counters = self.domains.entry(domain.to_string()).or_default();
        counters.total += 1;
        if health.is_up() {
            counters.up += 1;
        }
    }

    pub fn availability_percent(&self, domain: &str) -> Result<u8> {
        self.domains
            .get(domain)
            .map(DomainCounters::percent)
            .ok_or_else(|| MonitorError::DomainNotFound(domain.to_string()))
    }

    pub fn counters(&self, domain: &str) -> Option<DomainCounters> {
        self.domains.get(domain).copied()
    }

    /// Snapshot of every domain, sorted by name
    pub fn domains(&self) -> Vec<(String, DomainCounters)> {
        let mut snapshot: Vec<_> = self
            .domains
            .iter()
            .map(|(domain, counters)| (domain.clone(), *counters))
            .collect();
        snapshot.sort_by(|a, b| a.0.cmp(&b.0));
        snapshot
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// What the monitor reports after each endpoint check
#[derive(Clone, Debug)]
pub struct Observation {
    pub endpoint: String,
    pub domain: String,
    pub health: Health,
    pub availability: u8,
    pub checked_at: DateTime<Utc>,
}

impl std::fmt::Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} has {}% availability percentage",
            self.domain, self.availability
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creates_and_counts() {
        let mut ledger = AvailabilityLedger::new();
        assert!(ledger.is_empty());

        ledger.record("example.com", Health::Up);
        ledger.record("example.com", Health::Down);

        assert_eq!(
            ledger.counters("example.com"),
            Some(DomainCounters { up: 1, total: 2 })
        );
        assert_eq!(ledger.availability_percent("example.com").unwrap(), 50);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_unknown_domain() {
        let ledger = AvailabilityLedger::new();
        let err = ledger.availability_percent("nowhere.test").unwrap_err();
        assert!(matches!(err, MonitorError::DomainNotFound(d) if d == "nowhere.test"));
    }

    #[test]
    fn test_percent_rounding() {
        let cases = [
            (0, 1, 0),
            (1, 1, 100),
            (1, 3, 33),
            (2, 3, 67),
            (1, 8, 13), // 12.5 rounds up
            (1, 200, 1), // 0.5 rounds up
            (199, 200, 100), // 99.5 rounds up
            (0, 7, 0),
            (7, 7, 100),
        ];

        for (up, total, expected) in cases {
            let counters = DomainCounters { up, total };
            assert_eq!(counters.percent(), expected, "up={} total={}", up, total);
        }
    }

    #[test]
    fn test_counts_independent_of_interleaving() {
        let mut ledger = AvailabilityLedger::new();
        let a = [Health::Up, Health::Down, Health::Up, Health::Up, Health::Down];
        let b = [Health::Down, Health::Down, Health::Up];

        for i in 0..a.len().max(b.len()) {
            if let Some(health) = b.get(i) {
                ledger.record("b.com", *health);
            }
            if let Some(health) = a.get(i) {
                ledger.record("a.com", *health);
            }
        }

        assert_eq!(ledger.counters("a.com"), Some(DomainCounters { up: 3, total: 5 }));
        assert_eq!(ledger.counters("b.com"), Some(DomainCounters { up: 1, total: 3 }));
        for (_, counters) in ledger.domains() {
            assert!(counters.up <= counters.total);
            assert!(counters.percent() <= 100);
        }
    }

    #[test]
    fn test_domains_snapshot_sorted() {
        let mut ledger = AvailabilityLedger::new();
        ledger.record("z.com", Health::Up);
        ledger.record("a.com", Health::Down);

        let names: Vec<_> = ledger.domains().into_iter().map(|(d, _)| d).collect();
        assert_eq!(names, vec!["a.com", "z.com"]);
    }

    #[test]
    fn test_observation_display() {
        let observation = Observation {
            endpoint: "svc".to_string(),
            domain: "example.com".to_string(),
            health: Health::Up,
            availability: 100,
            checked_at: Utc::now(),
        };
        assert_eq!(
            observation.to_string(),
            "example.com has 100% availability percentage"
        );
    }
}
