//! Report assembly: walks a config's sections and fields over one record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::assessment::classify::{classify_value, ClassificationResult};
use crate::assessment::config::{AssessmentConfig, ConfigRegistry};
use crate::assessment::path::resolve_path_or_null;
use crate::assessment::store::{AssessmentRecord, AssessmentStore};
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub assessment_name: String,
    pub session_id: String,
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<ReportSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    pub id: String,
    pub title: String,
    pub fields: Vec<ReportField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportField {
    pub key: String,
    pub label: String,
    pub value: Value,
    pub unit: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub classification: Option<ClassificationResult>,
}

/// Maps one record through one config. Section and field order follow the config.
pub fn build_report(
    record: &AssessmentRecord,
    config: &AssessmentConfig,
    generated_at: DateTime<Utc>,
) -> ReportData {
    let sections = config
        .sections
        .iter()
        .map(|section| ReportSection {
            id: section.id.clone(),
            title: section.title.clone(),
            fields: section
                .fields
                .iter()
                .map(|field| {
                    let value = resolve_path_or_null(&record.data, &field.path);
                    let classification = classify_value(&value, field.classification.as_ref());
                    ReportField {
                        key: field.key.clone(),
                        label: field.label.clone(),
                        value,
                        unit: field.unit.clone(),
                        field_type: field.field_type.clone(),
                        classification,
                    }
                })
                .collect(),
        })
        .collect();

    ReportData {
        assessment_name: config.name.clone(),
        session_id: record.session_id.clone(),
        generated_at,
        sections,
    }
}

/// Looks up the record for `session_id` and its config, then builds the report.
pub fn assemble_report(
    store: &AssessmentStore,
    registry: &ConfigRegistry,
    session_id: &str,
) -> Result<ReportData, AppError> {
    let record = store.find(session_id).ok_or_else(|| {
        AppError::NotFound("Assessment data not found for the given session_id".to_string())
    })?;

    let config = registry.get(&record.assessment_id).ok_or_else(|| {
        AppError::Validation(format!(
            "Configuration not found for assessment type: {}",
            record.assessment_id
        ))
    })?;

    Ok(build_report(record, config, Utc::now()))
}
