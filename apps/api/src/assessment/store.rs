use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

const BUILTIN_RECORDS: &str = include_str!("../../data/assessments.json");

/// A raw assessment record plus the two ids every record must carry.
/// `data` is the full record; field paths resolve against it.
#[derive(Debug, Clone)]
pub struct AssessmentRecord {
    pub session_id: String,
    pub assessment_id: String,
    pub data: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub assessment_id: String,
}

/// Read-only set of assessment records, looked up by session id.
#[derive(Debug, Clone, Default)]
pub struct AssessmentStore {
    records: Vec<AssessmentRecord>,
}

impl AssessmentStore {
    /// Loads the bundled demonstration records.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_RECORDS).context("Bundled assessment records are invalid")
    }

    /// Parses a JSON array of records. Entries without a string `session_id`
    /// and `assessment_id` are skipped.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Vec<Value> = serde_json::from_str(json).context("Failed to parse assessment records")?;
        Ok(Self::from_values(raw))
    }

    pub fn from_values(raw: Vec<Value>) -> Self {
        let records = raw
            .into_iter()
            .filter_map(|data| {
                let session_id = data.get("session_id").and_then(Value::as_str);
                let assessment_id = data.get("assessment_id").and_then(Value::as_str);
                match (session_id, assessment_id) {
                    (Some(session_id), Some(assessment_id)) => Some(AssessmentRecord {
                        session_id: session_id.to_string(),
                        assessment_id: assessment_id.to_string(),
                        data,
                    }),
                    _ => {
                        warn!("Skipping assessment record without session_id/assessment_id");
                        None
                    }
                }
            })
            .collect();
        Self { records }
    }

    /// First record with a matching session id.
    pub fn find(&self, session_id: &str) -> Option<&AssessmentRecord> {
        self.records.iter().find(|r| r.session_id == session_id)
    }

    pub fn sessions(&self) -> Vec<SessionSummary> {
        self.records
            .iter()
            .map(|r| SessionSummary {
                session_id: r.session_id.clone(),
                assessment_id: r.assessment_id.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_records() {
        let store = AssessmentStore::builtin().unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.find("session_001").unwrap().assessment_id, "as_hr_02");
        assert_eq!(store.find("session_002").unwrap().assessment_id, "as_card_01");
        assert!(store.find("session_999").is_none());
    }

    #[test]
    fn test_records_without_ids_are_skipped() {
        let store = AssessmentStore::from_values(vec![
            json!({ "session_id": "s1", "assessment_id": "a1" }),
            json!({ "session_id": "s2" }),
            json!({ "session_id": 3, "assessment_id": "a3" }),
        ]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.sessions()[0].session_id, "s1");
    }

    #[test]
    fn test_find_returns_first_duplicate() {
        let store = AssessmentStore::from_values(vec![
            json!({ "session_id": "s1", "assessment_id": "first" }),
            json!({ "session_id": "s1", "assessment_id": "second" }),
        ]);
        assert_eq!(store.find("s1").unwrap().assessment_id, "first");
    }
}
