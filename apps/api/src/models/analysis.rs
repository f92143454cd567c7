use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::document::MediaKind;

/// Structured facts pulled from raw resume text. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Catalog entries found in the text, in catalog order.
    pub skills: Vec<String>,
    /// Catalog entries found in the text, in catalog order.
    pub education: Vec<String>,
}

/// Labels from the two independent model pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: String,
    pub recommended_job: String,
}

/// Everything returned for one analyzed resume. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub media_kind: MediaKind,
    pub classification: ClassificationResult,
    pub extraction: ExtractionResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_serialize_as_null_and_empty() {
        let json = serde_json::to_value(ExtractionResult::default()).unwrap();
        assert!(json["name"].is_null());
        assert!(json["phone"].is_null());
        assert!(json["email"].is_null());
        assert_eq!(json["skills"], serde_json::json!([]));
        assert_eq!(json["education"], serde_json::json!([]));
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let report = AnalysisReport {
            analysis_id: Uuid::new_v4(),
            analyzed_at: Utc::now(),
            media_kind: MediaKind::Pdf,
            classification: ClassificationResult {
                category: "Data Science".to_string(),
                recommended_job: "Data Analyst".to_string(),
            },
            extraction: ExtractionResult {
                name: Some("Jane Doe".to_string()),
                skills: vec!["Python".to_string()],
                ..Default::default()
            },
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.analysis_id, report.analysis_id);
        assert_eq!(back.classification, report.classification);
        assert_eq!(back.extraction, report.extraction);
        assert_eq!(back.media_kind, MediaKind::Pdf);
    }
}
