//! Alert definition store
//!
//! Keyed by alert id. The API layer is the only writer; the evaluation sweep
//! only reads (and only sees enabled alerts through [`AlertStore::list_enabled`]).
//! An alert's pattern is fixed at creation, so parameter updates re-validate
//! against the stored pattern before replacing the values.

use std::collections::HashMap;
use std::sync::RwLock;
use watch_core::{AlertDefinition, AlertParams, Result};

/// In-memory alert-id -> definition table
pub struct AlertStore {
    alerts: RwLock<HashMap<String, AlertDefinition>>,
}

impl Default for AlertStore {
    fn default() -> Self {
        Self {
            alerts: RwLock::new(HashMap::new()),
        }
    }
}

impl AlertStore {
    /// Create an empty alert store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition; replaces any previous entry with the same id
    pub fn insert(&self, alert: AlertDefinition) {
        let mut alerts = self.alerts.write().unwrap();
        alerts.insert(alert.id.clone(), alert);
    }

    /// Definition by id
    pub fn get(&self, id: &str) -> Option<AlertDefinition> {
        let alerts = self.alerts.read().unwrap();
        alerts.get(id).cloned()
    }

    /// Remove a definition, returning it if present
    pub fn remove(&self, id: &str) -> Option<AlertDefinition> {
        let mut alerts = self.alerts.write().unwrap();
        alerts.remove(id)
    }

    /// Every definition, oldest first
    pub fn list(&self) -> Vec<AlertDefinition> {
        let alerts = self.alerts.read().unwrap();
        let mut all: Vec<AlertDefinition> = alerts.values().cloned().collect();
        all.sort_by_key(|a| a.created_at);
        all
    }

    /// Enabled definitions only, oldest first
    pub fn list_enabled(&self) -> Vec<AlertDefinition> {
        let mut enabled: Vec<AlertDefinition> = {
            let alerts = self.alerts.read().unwrap();
            alerts.values().filter(|a| a.enabled).cloned().collect()
        };
        enabled.sort_by_key(|a| a.created_at);
        enabled
    }

    /// Definitions watching `symbol`, oldest first
    pub fn for_symbol(&self, symbol: &str) -> Vec<AlertDefinition> {
        let mut matching: Vec<AlertDefinition> = {
            let alerts = self.alerts.read().unwrap();
            alerts
                .values()
                .filter(|a| a.symbol == symbol)
                .cloned()
                .collect()
        };
        matching.sort_by_key(|a| a.created_at);
        matching
    }

    /// Toggle an alert on or off; returns false if the id is unknown
    pub fn set_enabled(&self, id: &str, enabled: bool) -> bool {
        let mut alerts = self.alerts.write().unwrap();
        match alerts.get_mut(id) {
            Some(alert) => {
                alert.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Replace an alert's parameters, keeping its pattern.
    ///
    /// Validates the new values against the stored pattern's schema; returns
    /// false (without error) if the id is unknown.
    pub fn update_params(&self, id: &str, parameters: AlertParams) -> Result<bool> {
        let mut alerts = self.alerts.write().unwrap();
        match alerts.get_mut(id) {
            Some(alert) => {
                alert.pattern.validate_params(&parameters)?;
                alert.parameters = parameters;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn len(&self) -> usize {
        let alerts = self.alerts.read().unwrap();
        alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
