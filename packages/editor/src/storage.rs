//! # Persistence collaborators
//!
//! The editor never talks to storage itself. A host hands it a [`DocumentStore`] to save
//! through and a [`DocumentSource`] to load from; [`MemoryStore`] implements both for tests
//! and offline use.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a save sends: document metadata plus both serialized forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    /// `None` on first save; the store assigns one
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    /// JSON text of the block list
    pub blocks: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_id: Option<String>,
}

impl SaveResponse {
    pub fn saved(new_id: Option<String>) -> Self {
        Self {
            success: true,
            error: None,
            new_id,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            new_id: None,
        }
    }
}

pub trait DocumentStore {
    fn save(&mut self, request: &SaveRequest) -> SaveResponse;
}

pub trait DocumentSource {
    /// Serialized block list of a stored document
    fn fetch(&self, id: &str) -> Option<String>;
}

/// In-memory store keyed by generated ids
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: HashMap<String, SaveRequest>,
    next_id: u32,
    failure: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every following save with `message`
    pub fn fail_with(&mut self, message: &str) {
        self.failure = Some(message.to_string());
    }

    pub fn get(&self, id: &str) -> Option<&SaveRequest> {
        self.documents.get(id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn save(&mut self, request: &SaveRequest) -> SaveResponse {
        if let Some(message) = &self.failure {
            return SaveResponse::failed(message.clone());
        }

        match &request.id {
            Some(id) if self.documents.contains_key(id) => {
                self.documents.insert(id.clone(), request.clone());
                SaveResponse::saved(None)
            }
            Some(id) => SaveResponse::failed(format!("Email {id} not found")),
            None => {
                self.next_id += 1;
                let id = self.next_id.to_string();
                let mut stored = request.clone();
                stored.id = Some(id.clone());
                self.documents.insert(id.clone(), stored);
                SaveResponse::saved(Some(id))
            }
        }
    }
}

impl DocumentSource for MemoryStore {
    fn fetch(&self, id: &str) -> Option<String> {
        self.documents.get(id).map(|doc| doc.blocks.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: Option<&str>) -> SaveRequest {
        SaveRequest {
            id: id.map(str::to_string),
            name: "Welcome".to_string(),
            description: String::new(),
            blocks: "[]".to_string(),
            html: "<html></html>".to_string(),
        }
    }

    #[test]
    fn test_first_save_assigns_id() {
        let mut store = MemoryStore::new();
        let response = store.save(&request(None));
        assert_eq!(response, SaveResponse::saved(Some("1".to_string())));
        assert_eq!(store.fetch("1").as_deref(), Some("[]"));
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let mut store = MemoryStore::new();
        let response = store.save(&request(Some("42")));
        assert!(!response.success);
        assert!(store.is_empty());
    }

    #[test]
    fn test_response_json_uses_new_id() {
        let json = serde_json::to_value(SaveResponse::saved(Some("7".to_string()))).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "newId": "7" }));

        let request = serde_json::to_value(request(None)).unwrap();
        assert!(request["id"].is_null());
    }
}
