//! One resume, start to finish: load -> classify the cleaned text -> extract from the raw text.
//!
//! Synchronous and CPU-bound. Handlers run it inside `tokio::task::spawn_blocking`.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::classification::ClassificationService;
use crate::extraction::extract_fields;
use crate::ingest::{load_document, LoadError, PdfBackend};
use crate::models::analysis::AnalysisReport;
use crate::models::document::{MediaKind, RawDocument};

/// Loads `document` and analyzes its text. A load failure stops the run before any model
/// or rule sees the document.
pub fn analyze_document(
    document: &RawDocument,
    classifier: &ClassificationService,
    pdf: &dyn PdfBackend,
) -> Result<AnalysisReport, LoadError> {
    let text = load_document(document, pdf)?;
    Ok(analyze_text(&text, document.kind, classifier))
}

/// Analyzes text that is already loaded. Classification sees the cleaned text; field rules
/// see the text exactly as loaded.
pub fn analyze_text(
    text: &str,
    media_kind: MediaKind,
    classifier: &ClassificationService,
) -> AnalysisReport {
    let analysis_id = Uuid::new_v4();
    debug!(
        "Analysis {analysis_id}: {} chars of {media_kind:?} text",
        text.chars().count()
    );

    let classification = classifier.classify(text);
    let extraction = extract_fields(text);

    info!(
        "Analysis {analysis_id}: category={}, recommended_job={}, skills={}, education={}",
        classification.category,
        classification.recommended_job,
        extraction.skills.len(),
        extraction.education.len()
    );

    AnalysisReport {
        analysis_id,
        analyzed_at: Utc::now(),
        media_kind,
        classification,
        extraction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::service::fixtures;
    use crate::models::analysis::ExtractionResult;

    const RESUME: &str = "Jane Doe\n\
        jane.doe@example.com | (415) 555-2671\n\
        B.S. Computer Science\n\
        Skills: Python, SQL, Pandas and Machine Learning\n\
        #opentowork https://github.com/janedoe ";

    struct Pages(Vec<&'static str>);

    impl PdfBackend for Pages {
        fn page_texts(&self, _bytes: &[u8]) -> Result<Vec<String>, LoadError> {
            Ok(self.0.iter().map(|p| p.to_string()).collect())
        }
    }

    struct Broken;

    impl PdfBackend for Broken {
        fn page_texts(&self, _bytes: &[u8]) -> Result<Vec<String>, LoadError> {
            Err(LoadError::Pdf("trailer not found".to_string()))
        }
    }

    #[test]
    fn test_plain_text_resume_end_to_end() {
        let service = fixtures::service();
        let document = RawDocument::new(RESUME.as_bytes().to_vec(), MediaKind::PlainText);

        let report = analyze_document(&document, &service, &Broken).unwrap();

        assert_eq!(report.media_kind, MediaKind::PlainText);
        assert_eq!(report.classification.category, "Data Science");
        assert_eq!(report.classification.recommended_job, "Data Analyst");
        assert_eq!(report.extraction.name.as_deref(), Some("Jane Doe"));
        assert_eq!(report.extraction.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(report.extraction.phone.as_deref(), Some("(415) 555-2671"));
        assert_eq!(
            report.extraction.skills,
            ["Python", "Machine Learning", "SQL", "Pandas"]
        );
        assert_eq!(report.extraction.education, ["Computer Science"]);
    }

    #[test]
    fn test_pdf_pages_are_joined_before_analysis() {
        let service = fixtures::service();
        let document = RawDocument::new(&b"%PDF-1.7"[..], MediaKind::Pdf);
        // "Java" + "Script" only becomes a skill once the pages are glued together
        let backend = Pages(vec!["Built UIs in Java", "Script and React"]);

        let report = analyze_document(&document, &service, &backend).unwrap();

        assert_eq!(report.media_kind, MediaKind::Pdf);
        assert_eq!(report.extraction.skills, ["JavaScript", "React"]);
        assert_eq!(report.classification.category, "Web Designing");
        assert_eq!(report.classification.recommended_job, "Frontend Developer");
    }

    #[test]
    fn test_load_failure_short_circuits() {
        let service = fixtures::service();
        let document = RawDocument::new(&b"%PDF-1.7"[..], MediaKind::Pdf);
        let err = analyze_document(&document, &service, &Broken).unwrap_err();
        assert!(matches!(err, LoadError::Pdf(_)));
    }

    #[test]
    fn test_blank_text_still_gets_a_report() {
        let service = fixtures::service();
        let report = analyze_text("", MediaKind::PlainText, &service);
        assert_eq!(report.extraction, ExtractionResult::default());
        assert!(!report.classification.category.is_empty());
    }

    #[test]
    fn test_each_analysis_has_its_own_id() {
        let service = fixtures::service();
        let a = analyze_text(RESUME, MediaKind::PlainText, &service);
        let b = analyze_text(RESUME, MediaKind::PlainText, &service);
        assert_ne!(a.analysis_id, b.analysis_id);
        assert_eq!(a.classification, b.classification);
        assert_eq!(a.extraction, b.extraction);
    }
}
