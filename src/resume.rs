//! Resume upload validation.

use session_store::ResumeMeta;
use thiserror::Error;
use time::OffsetDateTime;

pub const MAX_RESUME_BYTES: u64 = 10 * 1024 * 1024;

/// PDF, legacy Word, and OOXML Word.
pub const ACCEPTED_RESUME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// A file offered for upload, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeCandidate {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

impl ResumeCandidate {
    pub fn new(name: impl Into<String>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResumeRejected {
    #[error("Please upload only PDF or Word documents (max 10MB)")]
    UnsupportedType { mime_type: String },
    #[error("Please upload only PDF or Word documents (max 10MB)")]
    TooLarge { size_bytes: u64 },
    #[error("resume file name is empty")]
    EmptyName,
}

pub fn is_accepted_mime_type(mime_type: &str) -> bool {
    ACCEPTED_RESUME_TYPES
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(mime_type.trim()))
}

/// Validates a candidate and stamps the acceptance time.
pub fn validate_resume(candidate: &ResumeCandidate) -> Result<ResumeMeta, ResumeRejected> {
    validate_resume_at(candidate, OffsetDateTime::now_utc())
}

pub fn validate_resume_at(
    candidate: &ResumeCandidate,
    uploaded_at: OffsetDateTime,
) -> Result<ResumeMeta, ResumeRejected> {
    let name = candidate.name.trim();
    if name.is_empty() {
        return Err(ResumeRejected::EmptyName);
    }
    if !is_accepted_mime_type(&candidate.mime_type) {
        return Err(ResumeRejected::UnsupportedType {
            mime_type: candidate.mime_type.clone(),
        });
    }
    if candidate.size_bytes > MAX_RESUME_BYTES {
        return Err(ResumeRejected::TooLarge {
            size_bytes: candidate.size_bytes,
        });
    }

    Ok(ResumeMeta {
        name: name.to_string(),
        size_bytes: candidate.size_bytes,
        mime_type: candidate.mime_type.trim().to_ascii_lowercase(),
        uploaded_at,
    })
}

/// Renders a byte count as megabytes with two decimals.
pub fn human_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn accepts_two_megabyte_pdf() {
        let meta = validate_resume_at(
            &ResumeCandidate::new("resume.pdf", 2 * 1024 * 1024, "application/pdf"),
            datetime!(2026-02-14 10:00:00 UTC),
        )
        .expect("pdf should be accepted");

        assert_eq!(meta.name, "resume.pdf");
        assert_eq!(human_size(meta.size_bytes), "2.00 MB");
    }

    #[test]
    fn accepts_exactly_ten_megabytes_but_not_more() {
        let docx = ACCEPTED_RESUME_TYPES[2];
        assert!(validate_resume(&ResumeCandidate::new("cv.docx", MAX_RESUME_BYTES, docx)).is_ok());
        assert_eq!(
            validate_resume(&ResumeCandidate::new("cv.docx", MAX_RESUME_BYTES + 1, docx)),
            Err(ResumeRejected::TooLarge {
                size_bytes: MAX_RESUME_BYTES + 1
            })
        );
    }

    #[test]
    fn rejects_images_with_user_message() {
        let error = validate_resume(&ResumeCandidate::new("me.png", 1024, "image/png"))
            .expect_err("png should be rejected");
        assert_eq!(
            error.to_string(),
            "Please upload only PDF or Word documents (max 10MB)"
        );
    }

    #[test]
    fn accepted_types_match_case_insensitively() {
        for mime_type in ACCEPTED_RESUME_TYPES {
            assert!(is_accepted_mime_type(&mime_type.to_ascii_uppercase()));
        }
        assert!(!is_accepted_mime_type("application/pdf+zip"));
    }

    #[test]
    fn rejects_blank_names() {
        assert_eq!(
            validate_resume(&ResumeCandidate::new("  ", 10, "application/msword")),
            Err(ResumeRejected::EmptyName)
        );
    }
}
