//! Site content storage: FAQ entries, portfolio projects, email templates.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use crate::store::StoreError;

/// A question/answer pair shown on the FAQ page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    /// Display ordering, ascending.
    pub position: u32,
}

/// A portfolio project shown on the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub url: Option<String>,
    /// Public URL of the cover image; storage itself is external.
    pub image_url: Option<String>,
    pub position: u32,
}

/// An outbound email template editable from the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub id: Uuid,
    pub name: String,
    pub subject: String,
    pub body: String,
}

#[derive(Serialize, Deserialize, Default)]
struct ContentSnapshot {
    faq: Vec<FaqEntry>,
    projects: Vec<Project>,
    templates: Vec<EmailTemplate>,
}

/// A thread-safe content store with optional JSON snapshot persistence.
#[derive(Clone, Default)]
pub struct ContentStore {
    faq: Arc<DashMap<Uuid, FaqEntry>>,
    projects: Arc<DashMap<Uuid, Project>>,
    templates: Arc<DashMap<Uuid, EmailTemplate>>,
    persistence_path: Option<String>,
}

impl ContentStore {
    /// Create a new empty store.
    pub fn new(persistence_path: Option<String>) -> Self {
        Self {
            persistence_path,
            ..Self::default()
        }
    }

    /// Load from file if it exists.
    pub fn load_from_file(path: &str) -> Result<Self, StoreError> {
        let store = Self::new(Some(path.to_string()));
        if Path::new(path).exists() {
            let file = File::open(path)?;
            let reader = BufReader::new(file);
            let snapshot: ContentSnapshot = serde_json::from_reader(reader)?;
            for entry in snapshot.faq {
                store.faq.insert(entry.id, entry);
            }
            for project in snapshot.projects {
                store.projects.insert(project.id, project);
            }
            for template in snapshot.templates {
                store.templates.insert(template.id, template);
            }
            tracing::info!(
                faq = store.faq.len(),
                projects = store.projects.len(),
                templates = store.templates.len(),
                path = %path,
                "Loaded content snapshot"
            );
        }
        Ok(store)
    }

    /// Save to file, if a persistence path was configured.
    pub fn save_to_file(&self) -> Result<(), StoreError> {
        if let Some(path) = &self.persistence_path {
            let file = File::create(path)?;
            let writer = BufWriter::new(file);
            let snapshot = ContentSnapshot {
                faq: self.list_faq(),
                projects: self.list_projects(),
                templates: self.list_templates(),
            };
            serde_json::to_writer(writer, &snapshot)?;
            tracing::info!(path = %path, "Saved content snapshot");
        }
        Ok(())
    }

    // FAQ

    pub fn list_faq(&self) -> Vec<FaqEntry> {
        let mut entries: Vec<FaqEntry> = self.faq.iter().map(|r| r.value().clone()).collect();
        entries.sort_by_key(|e| (e.position, e.id));
        entries
    }

    pub fn insert_faq(&self, question: String, answer: String, position: u32) -> FaqEntry {
        let entry = FaqEntry {
            id: Uuid::new_v4(),
            question,
            answer,
            position,
        };
        self.faq.insert(entry.id, entry.clone());
        entry
    }

    /// Replace an entry's fields. Returns the updated entry.
    pub fn update_faq(
        &self,
        id: Uuid,
        question: String,
        answer: String,
        position: u32,
    ) -> Option<FaqEntry> {
        self.faq.get_mut(&id).map(|mut r| {
            r.question = question;
            r.answer = answer;
            r.position = position;
            r.clone()
        })
    }

    pub fn remove_faq(&self, id: Uuid) -> bool {
        self.faq.remove(&id).is_some()
    }

    // Projects

    pub fn list_projects(&self) -> Vec<Project> {
        let mut projects: Vec<Project> = self.projects.iter().map(|r| r.value().clone()).collect();
        projects.sort_by_key(|p| (p.position, p.id));
        projects
    }

    pub fn insert_project(&self, project: Project) -> Project {
        self.projects.insert(project.id, project.clone());
        project
    }

    pub fn update_project(&self, id: Uuid, updated: Project) -> Option<Project> {
        self.projects.get_mut(&id).map(|mut r| {
            *r = Project { id, ..updated };
            r.clone()
        })
    }

    pub fn remove_project(&self, id: Uuid) -> bool {
        self.projects.remove(&id).is_some()
    }

    // Email templates

    pub fn list_templates(&self) -> Vec<EmailTemplate> {
        let mut templates: Vec<EmailTemplate> =
            self.templates.iter().map(|r| r.value().clone()).collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        templates
    }

    pub fn insert_template(&self, name: String, subject: String, body: String) -> EmailTemplate {
        let template = EmailTemplate {
            id: Uuid::new_v4(),
            name,
            subject,
            body,
        };
        self.templates.insert(template.id, template.clone());
        template
    }

    pub fn update_template(
        &self,
        id: Uuid,
        name: String,
        subject: String,
        body: String,
    ) -> Option<EmailTemplate> {
        self.templates.get_mut(&id).map(|mut r| {
            r.name = name;
            r.subject = subject;
            r.body = body;
            r.clone()
        })
    }

    pub fn remove_template(&self, id: Uuid) -> bool {
        self.templates.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faq_ordering_by_position() {
        let store = ContentStore::new(None);
        store.insert_faq("Second?".into(), "B".into(), 2);
        store.insert_faq("First?".into(), "A".into(), 1);

        let entries = store.list_faq();
        assert_eq!(entries[0].question, "First?");
        assert_eq!(entries[1].question, "Second?");
    }

    #[test]
    fn test_faq_update_and_remove() {
        let store = ContentStore::new(None);
        let entry = store.insert_faq("Q?".into(), "A".into(), 1);

        let updated = store
            .update_faq(entry.id, "Q?".into(), "Better answer".into(), 1)
            .unwrap();
        assert_eq!(updated.answer, "Better answer");

        assert!(store.remove_faq(entry.id));
        assert!(store.list_faq().is_empty());
        assert!(store
            .update_faq(entry.id, "Q?".into(), "A".into(), 1)
            .is_none());
    }

    #[test]
    fn test_project_update_keeps_id() {
        let store = ContentStore::new(None);
        let project = store.insert_project(Project {
            id: Uuid::new_v4(),
            title: "Boulangerie Dupont".into(),
            description: "Site vitrine".into(),
            url: None,
            image_url: None,
            position: 1,
        });

        let updated = store
            .update_project(
                project.id,
                Project {
                    id: Uuid::new_v4(), // ignored
                    title: "Boulangerie Dupont".into(),
                    description: "Site vitrine + réservation".into(),
                    url: Some("https://dupont.example".into()),
                    image_url: None,
                    position: 1,
                },
            )
            .unwrap();
        assert_eq!(updated.id, project.id);
        assert_eq!(updated.url.as_deref(), Some("https://dupont.example"));
    }

    #[test]
    fn test_templates_sorted_by_name() {
        let store = ContentStore::new(None);
        store.insert_template("relance".into(), "Suite à votre demande".into(), "…".into());
        store.insert_template("accueil".into(), "Bienvenue".into(), "…".into());

        let names: Vec<String> = store.list_templates().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["accueil", "relance"]);
    }

    #[test]
    fn test_persistence_roundtrip() {
        let path = "test_content_persistence.json";

        let store = ContentStore::new(Some(path.to_string()));
        let entry = store.insert_faq("Délais ?".into(), "2 à 6 semaines".into(), 1);
        store.insert_template("devis".into(), "Votre devis".into(), "Bonjour…".into());
        store.save_to_file().unwrap();

        let loaded = ContentStore::load_from_file(path).unwrap();
        assert_eq!(loaded.list_faq()[0].id, entry.id);
        assert_eq!(loaded.list_templates().len(), 1);

        std::fs::remove_file(path).unwrap_or_default();
    }
}
