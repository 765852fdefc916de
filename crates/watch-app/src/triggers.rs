//! Recent-trigger log
//!
//! Notification dispatch is an external concern; what the core keeps is a
//! bounded in-memory record of recent triggers so operators (and the demo
//! CLI) can see what the alert sweep found.

use std::collections::VecDeque;
use std::sync::RwLock;
use watch_core::TriggeredAlert;

/// Default number of triggers retained
const DEFAULT_CAPACITY: usize = 128;

/// Bounded ring of recently triggered alerts
pub struct TriggerLog {
    entries: RwLock<VecDeque<TriggeredAlert>>,
    capacity: usize,
}

impl Default for TriggerLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl TriggerLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    /// Append one trigger, evicting the oldest entry when full
    pub fn record(&self, trigger: TriggeredAlert) {
        let mut entries = self.entries.write().unwrap();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(trigger);
    }

    /// Append a whole sweep's worth of triggers
    pub fn record_all(&self, triggers: impl IntoIterator<Item = TriggeredAlert>) {
        for trigger in triggers {
            self.record(trigger);
        }
    }

    /// Retained triggers, oldest first
    pub fn recent(&self) -> Vec<TriggeredAlert> {
        let entries = self.entries.read().unwrap();
        entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap();
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use watch_core::AlertPattern;

    fn trigger(n: usize) -> TriggeredAlert {
        TriggeredAlert {
            alert_id: format!("alert-{n:08}"),
            symbol: "AAPL".to_string(),
            pattern: AlertPattern::PriceTarget,
            reason: "price crossed".to_string(),
            price: 210.0,
            triggered_at: Utc::now(),
        }
    }

    #[test]
    fn test_record_and_recent() {
        let log = TriggerLog::new();
        assert!(log.is_empty());

        log.record(trigger(1));
        log.record(trigger(2));
        assert_eq!(log.len(), 2);
        assert_eq!(log.recent()[0].alert_id, "alert-00000001");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let log = TriggerLog::with_capacity(3);
        log.record_all((0..5).map(trigger));

        let recent = log.recent();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].alert_id, "alert-00000002");
        assert_eq!(recent[2].alert_id, "alert-00000004");
    }
}
