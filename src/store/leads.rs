//! Lead (CRM) storage.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use crate::observability::metrics;
use crate::store::{unix_now, StoreError};

/// Pipeline status of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Converted,
    Archived,
}

/// A contact-form submission tracked in the CRM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: String,
    pub status: LeadStatus,
    /// Seconds since the Unix epoch.
    pub created_at: u64,
}

/// Fields accepted from the public contact form.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: String,
}

/// A thread-safe lead store with optional JSON snapshot persistence.
#[derive(Clone, Default)]
pub struct LeadStore {
    inner: Arc<DashMap<Uuid, Lead>>,
    persistence_path: Option<String>,
}

impl LeadStore {
    /// Create a new empty store.
    pub fn new(persistence_path: Option<String>) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            persistence_path,
        }
    }

    /// Load from file if it exists.
    pub fn load_from_file(path: &str) -> Result<Self, StoreError> {
        let store = Self::new(Some(path.to_string()));
        if Path::new(path).exists() {
            let file = File::open(path)?;
            let reader = BufReader::new(file);
            let map: std::collections::HashMap<Uuid, Lead> = serde_json::from_reader(reader)?;
            for (k, v) in map {
                store.inner.insert(k, v);
            }
            tracing::info!(count = store.inner.len(), path = %path, "Loaded leads snapshot");
        }
        Ok(store)
    }

    /// Save to file, if a persistence path was configured.
    pub fn save_to_file(&self) -> Result<(), StoreError> {
        if let Some(path) = &self.persistence_path {
            let file = File::create(path)?;
            let writer = BufWriter::new(file);
            let map: std::collections::HashMap<_, _> = self
                .inner
                .iter()
                .map(|r| (*r.key(), r.value().clone()))
                .collect();
            serde_json::to_writer(writer, &map)?;
            tracing::info!(count = map.len(), path = %path, "Saved leads snapshot");
        }
        Ok(())
    }

    /// Record a new lead with status `New`.
    pub fn insert(&self, new: NewLead) -> Lead {
        let lead = Lead {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            company: new.company,
            message: new.message,
            status: LeadStatus::New,
            created_at: unix_now(),
        };
        self.inner.insert(lead.id, lead.clone());
        metrics::record_lead_created();
        lead
    }

    /// All leads, newest first.
    pub fn list(&self) -> Vec<Lead> {
        let mut leads: Vec<Lead> = self.inner.iter().map(|r| r.value().clone()).collect();
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        leads
    }

    pub fn get(&self, id: Uuid) -> Option<Lead> {
        self.inner.get(&id).map(|r| r.value().clone())
    }

    /// Move a lead to a new pipeline status. Returns the updated lead.
    pub fn set_status(&self, id: Uuid, status: LeadStatus) -> Option<Lead> {
        self.inner.get_mut(&id).map(|mut r| {
            r.status = status;
            r.clone()
        })
    }

    /// Remove a lead. Returns true when it existed.
    pub fn remove(&self, id: Uuid) -> bool {
        self.inner.remove(&id).is_some()
    }

    pub fn count(&self) -> usize {
        self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewLead {
        NewLead {
            name: "Claire Martin".into(),
            email: "claire@example.fr".into(),
            phone: Some("+33 6 12 34 56 78".into()),
            company: None,
            message: "Besoin d'un site vitrine".into(),
        }
    }

    #[test]
    fn test_insert_and_status_transition() {
        let store = LeadStore::new(None);
        let lead = store.insert(sample());
        assert_eq!(lead.status, LeadStatus::New);

        let updated = store.set_status(lead.id, LeadStatus::Contacted).unwrap();
        assert_eq!(updated.status, LeadStatus::Contacted);
        assert_eq!(store.get(lead.id).unwrap().status, LeadStatus::Contacted);
    }

    #[test]
    fn test_remove() {
        let store = LeadStore::new(None);
        let lead = store.insert(sample());
        assert!(store.remove(lead.id));
        assert!(!store.remove(lead.id));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_unknown_id_yields_none() {
        let store = LeadStore::new(None);
        assert!(store.set_status(Uuid::new_v4(), LeadStatus::Archived).is_none());
    }

    #[test]
    fn test_persistence_roundtrip() {
        let path = "test_leads_persistence.json";

        let store = LeadStore::new(Some(path.to_string()));
        let lead = store.insert(sample());
        store.save_to_file().unwrap();

        let loaded = LeadStore::load_from_file(path).unwrap();
        let restored = loaded.get(lead.id).unwrap();
        assert_eq!(restored.email, "claire@example.fr");
        assert_eq!(restored.status, LeadStatus::New);

        std::fs::remove_file(path).unwrap_or_default();
    }
}
