#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use super::*;
use crate::analysis::AnalysisResult;

const LONG_TEXT: &str =
    "05-05-2023 Arduino kits purchase from vendor 62000 Dr\n01-07-2023 3D printer 85000 Dr";

fn batch() -> AnalysisResult {
    serde_json::from_str(
        r#"{
            "transactions": [
                {"date": "05-05-2023", "narration": "Arduino kits", "amount": 62000,
                 "type": "Debit", "category": "Non-Recurring", "tranche": "Tranche 1",
                 "riskScore": "LOW", "verificationStatus": "Verified"}
            ],
            "observations": [
                {"type": "Documentation", "severity": "MEDIUM", "observation": "Invoice missing"}
            ],
            "complianceChecklist": [
                {"label": "GST invoices", "status": "Warning"}
            ]
        }"#,
    )
    .unwrap()
}

#[derive(Default)]
struct Calls {
    texts: Vec<String>,
    uploads: Vec<String>,
}

struct FakeAnalyzer {
    calls: Rc<RefCell<Calls>>,
    fail: bool,
}

impl Analyzer for FakeAnalyzer {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        self.calls.borrow_mut().texts.push(request.text_data.clone());
        if self.fail {
            return Err(AnalysisError::Server {
                status: 500,
                message: "Backend error: boom".into(),
            });
        }
        Ok(batch())
    }

    fn analyze_document(
        &self,
        document: &DocumentUpload,
        _mode: Mode,
        _account_type: AccountType,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.calls
            .borrow_mut()
            .uploads
            .push(document.file_name.clone());
        Ok(batch())
    }
}

struct FakeExtractor {
    text: &'static str,
    calls: Rc<RefCell<usize>>,
}

impl TextExtractor for FakeExtractor {
    fn extract(&self, _path: &Path, progress: &mut dyn FnMut(u8)) -> Result<String, ExtractError> {
        *self.calls.borrow_mut() += 1;
        progress(0);
        progress(100);
        Ok(self.text.to_string())
    }
}

struct Harness {
    pipeline: Pipeline,
    calls: Rc<RefCell<Calls>>,
    extractions: Rc<RefCell<usize>>,
}

fn harness(extracted: &'static str, fail: bool, document_mode: DocumentMode) -> Harness {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let extractions = Rc::new(RefCell::new(0));
    let pipeline = Pipeline::new(
        Box::new(FakeAnalyzer {
            calls: Rc::clone(&calls),
            fail,
        }),
        Box::new(FakeExtractor {
            text: extracted,
            calls: Rc::clone(&extractions),
        }),
        document_mode,
    );
    Harness {
        pipeline,
        calls,
        extractions,
    }
}

fn no_progress() -> impl FnMut(u8) {
    |_| {}
}

#[test]
fn test_empty_input_is_rejected() {
    let mut h = harness(LONG_TEXT, false, DocumentMode::Local);
    let mut session = SessionState::new();
    let submission = Submission::text("   \n ", Mode::School, AccountType::Savings);

    let err = h
        .pipeline
        .submit(&submission, &mut session, &mut no_progress())
        .unwrap_err();
    assert!(matches!(err, SubmitError::EmptyInput));
    assert!(h.calls.borrow().texts.is_empty());
    assert!(!h.pipeline.is_busy());
}

#[test]
fn test_reserve_twice_is_busy() {
    let mut h = harness(LONG_TEXT, false, DocumentMode::Local);
    h.pipeline.reserve().unwrap();
    assert!(h.pipeline.is_busy());
    assert!(matches!(h.pipeline.reserve(), Err(SubmitError::Busy)));
    assert!(h.pipeline.is_busy());
}

#[test]
fn test_submit_clears_reservation() {
    let mut h = harness(LONG_TEXT, false, DocumentMode::Local);
    let mut session = SessionState::new();
    h.pipeline.reserve().unwrap();
    let submission = Submission::text(LONG_TEXT, Mode::School, AccountType::Savings);
    h.pipeline
        .submit(&submission, &mut session, &mut no_progress())
        .unwrap();
    assert!(!h.pipeline.is_busy());
}

#[test]
fn test_pasted_text_is_sent_trimmed() {
    let mut h = harness(LONG_TEXT, false, DocumentMode::Local);
    let mut session = SessionState::new();
    let submission = Submission::text("  short note  ", Mode::Auditor, AccountType::Current);

    let added = h
        .pipeline
        .submit(&submission, &mut session, &mut no_progress())
        .unwrap();
    assert_eq!(added, 1);
    assert_eq!(h.calls.borrow().texts, vec!["short note".to_string()]);
    assert_eq!(*h.extractions.borrow(), 0);
}

#[test]
fn test_success_appends_and_replaces_observations() {
    let mut h = harness(LONG_TEXT, false, DocumentMode::Local);
    let mut session = SessionState::new();
    let submission = Submission::file("statement.pdf", Mode::School, AccountType::Savings);

    let mut seen = Vec::new();
    h.pipeline
        .submit(&submission, &mut session, &mut |p| seen.push(p))
        .unwrap();
    h.pipeline
        .submit(&submission, &mut session, &mut no_progress())
        .unwrap();

    assert_eq!(seen, vec![0, 100]);
    assert_eq!(session.transactions().len(), 2);
    assert_ne!(session.transactions()[0].id, session.transactions()[1].id);
    assert_eq!(session.observations().len(), 1);
    assert_eq!(session.checklist().len(), 1);
    assert_eq!(*h.extractions.borrow(), 2);
}

#[test]
fn test_too_short_extraction_leaves_session_untouched() {
    let mut h = harness("blurry", false, DocumentMode::Local);
    let mut session = SessionState::new();
    let submission = Submission::file("scan.jpg", Mode::School, AccountType::Savings);

    let err = h
        .pipeline
        .submit(&submission, &mut session, &mut no_progress())
        .unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Extraction(ExtractError::TooShort { len: 6 })
    ));
    assert!(err.to_string().contains("Could not extract readable text"));
    assert!(session.is_empty());
    assert!(h.calls.borrow().texts.is_empty());
    assert!(!h.pipeline.is_busy());
}

#[test]
fn test_analysis_failure_leaves_session_untouched() {
    let mut ok = harness(LONG_TEXT, false, DocumentMode::Local);
    let mut session = SessionState::new();
    let submission = Submission::text(LONG_TEXT, Mode::School, AccountType::Savings);
    ok.pipeline
        .submit(&submission, &mut session, &mut no_progress())
        .unwrap();
    let before = session.transactions().to_vec();

    let mut failing = harness(LONG_TEXT, true, DocumentMode::Local);
    let err = failing
        .pipeline
        .submit(&submission, &mut session, &mut no_progress())
        .unwrap_err();
    assert!(matches!(err, SubmitError::Analysis(AnalysisError::Server { .. })));
    assert_eq!(err.to_string(), "Backend error: boom");
    assert_eq!(session.transactions(), before.as_slice());
    assert_eq!(session.observations().len(), 1);
    assert!(!failing.pipeline.is_busy());
}

#[test]
fn test_remote_mode_uploads_without_local_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("passbook.png");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(b"\x89PNG fake image bytes")
        .unwrap();

    let mut h = harness(LONG_TEXT, false, DocumentMode::Remote);
    let mut session = SessionState::new();
    let submission = Submission::file(&path, Mode::School, AccountType::Savings);

    let added = h
        .pipeline
        .submit(&submission, &mut session, &mut no_progress())
        .unwrap();
    assert_eq!(added, 1);
    assert_eq!(*h.extractions.borrow(), 0);
    assert_eq!(h.calls.borrow().uploads, vec!["passbook.png".to_string()]);
    assert!(h.calls.borrow().texts.is_empty());
}

#[test]
fn test_remote_mode_unsupported_file() {
    let mut h = harness(LONG_TEXT, false, DocumentMode::Remote);
    let mut session = SessionState::new();
    let submission = Submission::file("ledger.xlsx", Mode::School, AccountType::Savings);

    let err = h
        .pipeline
        .submit(&submission, &mut session, &mut no_progress())
        .unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Extraction(ExtractError::Unsupported(_))
    ));
    assert!(session.is_empty());
}
