//! Report store: live table plus terminal archive
//!
//! Live reports are owned by their pipeline driver until they reach a
//! terminal state; [`ReportStore::archive`] then moves them into a read-only
//! archive that only the retention sweep ever removes from. Queries check the
//! live table first, then the archive, so a report stays addressable for its
//! whole retention window.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::warn;
use watch_core::{Report, ReportStatus};

/// In-memory report table with terminal archive
pub struct ReportStore {
    live: RwLock<HashMap<String, Report>>,
    archive: RwLock<HashMap<String, Report>>,
}

impl Default for ReportStore {
    fn default() -> Self {
        Self {
            live: RwLock::new(HashMap::new()),
            archive: RwLock::new(HashMap::new()),
        }
    }
}

impl ReportStore {
    /// Create an empty report store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a freshly created report to the live table
    pub fn insert(&self, report: Report) {
        let mut live = self.live.write().unwrap();
        live.insert(report.id.clone(), report);
    }

    /// Report by id, live table first, then archive
    pub fn get(&self, id: &str) -> Option<Report> {
        {
            let live = self.live.read().unwrap();
            if let Some(report) = live.get(id) {
                return Some(report.clone());
            }
        }
        let archive = self.archive.read().unwrap();
        archive.get(id).cloned()
    }

    /// Mutate a live report in place under the store lock.
    ///
    /// This is the single write path the pipeline driver uses; the closure
    /// runs while the lock is held, so keep it to the one entity. Returns
    /// false if the id is not in the live table.
    pub fn update(&self, id: &str, f: impl FnOnce(&mut Report)) -> bool {
        let mut live = self.live.write().unwrap();
        match live.get_mut(id) {
            Some(report) => {
                f(report);
                true
            }
            None => false,
        }
    }

    /// Move a terminal report from the live table into the archive.
    ///
    /// A non-terminal report is left live (and logged); losing a live report
    /// to the archive would strand its driver.
    pub fn archive(&self, id: &str) -> bool {
        let mut live = self.live.write().unwrap();
        let Some(report) = live.get(id) else {
            return false;
        };
        if !report.status.is_terminal() {
            warn!(report_id = %id, status = ?report.status, "refusing to archive non-terminal report");
            return false;
        }
        let report = live.remove(id).unwrap();
        drop(live);

        let mut archive = self.archive.write().unwrap();
        archive.insert(report.id.clone(), report);
        true
    }

    /// Live reports (queued or processing), oldest request first
    pub fn pending(&self) -> Vec<Report> {
        let mut pending: Vec<Report> = {
            let live = self.live.read().unwrap();
            live.values()
                .filter(|r| !r.status.is_terminal())
                .cloned()
                .collect()
        };
        pending.sort_by_key(|r| r.requested_at);
        pending
    }

    /// Archived reports that completed successfully, newest first
    pub fn completed(&self) -> Vec<Report> {
        let mut completed: Vec<Report> = {
            let archive = self.archive.read().unwrap();
            archive
                .values()
                .filter(|r| r.status == ReportStatus::Completed)
                .cloned()
                .collect()
        };
        completed.sort_by_key(|r| std::cmp::Reverse(r.completed_at));
        completed
    }

    /// Drop archived reports whose terminal timestamp is before `cutoff`.
    ///
    /// Returns the number of reports removed. Live reports are never touched.
    pub fn prune_completed_before(&self, cutoff: DateTime<Utc>) -> usize {
        let mut archive = self.archive.write().unwrap();
        let before = archive.len();
        archive.retain(|_, r| match r.completed_at {
            Some(done) => done >= cutoff,
            None => true,
        });
        before - archive.len()
    }

    /// Count of live reports
    pub fn live_len(&self) -> usize {
        let live = self.live.read().unwrap();
        live.len()
    }

    /// Count of archived reports
    pub fn archived_len(&self) -> usize {
        let archive = self.archive.read().unwrap();
        archive.len()
    }
}
