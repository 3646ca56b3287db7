use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessState {
    pub state: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One in-progress case-management process as returned by the search
/// service. `related_entities` carries display fields (person name,
/// address, patch) keyed by entity role.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRecord {
    pub id: String,
    pub process_name: String,
    pub target_type: String,
    pub target_id: String,
    pub current_state: ProcessState,
    #[serde(default)]
    pub related_entities: Vec<HashMap<String, String>>,
}

impl ProcessRecord {
    pub fn related(&self, key: &str) -> Option<&str> {
        self.related_entities
            .iter()
            .find_map(|entity| entity.get(key))
            .map(String::as_str)
    }
}

/// One page of search results together with the total match count.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub processes: Vec<ProcessRecord>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_search_hit() {
        let record: ProcessRecord = serde_json::from_str(
            r#"{
                "id": "a1b2",
                "processName": "soletojoint",
                "targetType": "tenure",
                "targetId": "t-77",
                "currentState": {
                    "state": "BreachChecksPassed",
                    "createdAt": "2026-02-11T09:30:00Z"
                },
                "relatedEntities": [
                    { "name": "J. Renton" },
                    { "address": "12 Example Road", "patch": "CP4" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(record.process_name, "soletojoint");
        assert_eq!(record.current_state.state, "BreachChecksPassed");
        assert!(record.current_state.status.is_none());
        assert!(record.current_state.created_at.is_some());
        assert_eq!(record.related("name"), Some("J. Renton"));
        assert_eq!(record.related("patch"), Some("CP4"));
        assert_eq!(record.related("priority"), None);
    }

    #[test]
    fn missing_related_entities_default_to_empty() {
        let record: ProcessRecord = serde_json::from_str(
            r#"{
                "id": "a1b2",
                "processName": "changeofname",
                "targetType": "person",
                "targetId": "p-3",
                "currentState": { "state": "NameSubmitted" }
            }"#,
        )
        .unwrap();

        assert!(record.related_entities.is_empty());
        assert_eq!(record.related("name"), None);
    }
}
