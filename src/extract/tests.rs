#![allow(clippy::unwrap_used)]

use super::*;
use std::io::Write;

struct FixedText<'a>(&'a str);

impl TextExtractor for FixedText<'_> {
    fn extract(&self, _path: &Path, progress: &mut dyn FnMut(u8)) -> Result<String, ExtractError> {
        progress(50);
        Ok(self.0.to_string())
    }
}

// ── clean_text ────────────────────────────────────────────────

#[test]
fn test_clean_text_collapses_whitespace() {
    assert_eq!(clean_text("01/04/2023   NEFT\t\tCR   500"), "01/04/2023 NEFT CR 500");
}

#[test]
fn test_clean_text_normalises_line_endings() {
    assert_eq!(clean_text("a 1\r\nb 2\rc 3"), "a 1\nb 2 c 3");
}

#[test]
fn test_clean_text_drops_only_blank_lines() {
    assert_eq!(
        clean_text("HEADER\n\n----\n  |  \n \t \nrow 1\n"),
        "HEADER\n----\n|\nrow 1"
    );
}

#[test]
fn test_clean_text_replaces_nbsp() {
    assert_eq!(clean_text("Rs.\u{a0}500"), "Rs. 500");
}

#[test]
fn test_clean_text_keeps_unicode() {
    assert_eq!(clean_text("₹ 1,200   received"), "₹ 1,200 received");
}

// ── extract_usable_text ───────────────────────────────────────

#[test]
fn test_short_text_is_rejected() {
    let result = extract_usable_text(&FixedText("too short"), Path::new("x.png"), &mut |_| {});
    match result {
        Err(ExtractError::TooShort { len }) => assert_eq!(len, 9),
        other => panic!("expected TooShort, got {other:?}"),
    }
}

#[test]
fn test_length_is_measured_after_cleaning() {
    // 49 raw chars, mostly whitespace and blank lines
    let padded = "abc                                  \n   \n\n  def";
    let result = extract_usable_text(&FixedText(padded), Path::new("x.png"), &mut |_| {});
    assert!(matches!(result, Err(ExtractError::TooShort { len: 7 })));
}

#[test]
fn test_minimum_length_boundary() {
    // Surrounding whitespace is trimmed away before counting
    let short = format!("  {}\n\n", "7".repeat(MIN_USABLE_TEXT_LEN - 1));
    let result = extract_usable_text(&FixedText(&short), Path::new("x.png"), &mut |_| {});
    match result {
        Err(ExtractError::TooShort { len }) => assert_eq!(len, 49),
        other => panic!("expected TooShort, got {other:?}"),
    }

    let exact = format!("  {}\n\n", "7".repeat(MIN_USABLE_TEXT_LEN));
    let text = extract_usable_text(&FixedText(&exact), Path::new("x.png"), &mut |_| {}).unwrap();
    assert_eq!(text.chars().count(), 50);
}

#[test]
fn test_usable_text_passes_through_cleaned() {
    let text = "01/04/2023  NEFT CR ATL GRANT TRANCHE 1   1200000.00 CR\n05/04/2023 ROBOKIT 45000 DR";
    let mut progress = Vec::new();
    let out = extract_usable_text(&FixedText(text), Path::new("x.png"), &mut |p| {
        progress.push(p)
    })
    .unwrap();
    assert!(out.starts_with("01/04/2023 NEFT CR ATL GRANT TRANCHE 1 1200000.00 CR"));
    assert!(out.chars().count() >= MIN_USABLE_TEXT_LEN);
    assert_eq!(progress, vec![50]);
}

// ── DocumentKind / routing ────────────────────────────────────

#[test]
fn test_document_kind_from_path() {
    assert_eq!(DocumentKind::from_path(Path::new("s.PDF")), Some(DocumentKind::Pdf));
    assert_eq!(DocumentKind::from_path(Path::new("s.jpeg")), Some(DocumentKind::Image));
    assert_eq!(DocumentKind::from_path(Path::new("s.csv")), Some(DocumentKind::Table));
    assert_eq!(DocumentKind::from_path(Path::new("s.txt")), Some(DocumentKind::PlainText));
    assert_eq!(DocumentKind::from_path(Path::new("s.docx")), None);
    assert_eq!(DocumentKind::from_path(Path::new("statement")), None);
}

#[test]
fn test_mime_types() {
    assert_eq!(DocumentKind::Pdf.mime_type(Path::new("a.pdf")), "application/pdf");
    assert_eq!(DocumentKind::Image.mime_type(Path::new("a.PNG")), "image/png");
    assert_eq!(DocumentKind::Image.mime_type(Path::new("a.jpg")), "image/jpeg");
}

#[test]
fn test_auto_extractor_rejects_unknown_types() {
    let auto = AutoExtractor::new(CommandExtractor::default());
    let result = auto.extract(Path::new("statement.docx"), &mut |_| {});
    assert!(matches!(result, Err(ExtractError::Unsupported(_))));
}

#[test]
fn test_auto_extractor_reads_text_directly() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(b"plain statement text").unwrap();
    let auto = AutoExtractor::new(CommandExtractor::default());
    let text = auto.extract(file.path(), &mut |_| {}).unwrap();
    assert_eq!(text, "plain statement text");
}

#[test]
fn test_missing_program_is_reported() {
    let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    let extractor = CommandExtractor {
        tesseract_program: "atlaudit-no-such-ocr-binary".into(),
        ..CommandExtractor::default()
    };
    let result = extractor.extract(file.path(), &mut |_| {});
    match result {
        Err(ExtractError::Program { program, .. }) => {
            assert_eq!(program, "atlaudit-no-such-ocr-binary")
        }
        other => panic!("expected Program error, got {other:?}"),
    }
}
