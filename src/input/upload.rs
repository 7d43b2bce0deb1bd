//! Upload validation for resumes, message attachments and profile images

use crate::input::file_detector::{extension_of, guess_mime_type};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

const MB: u64 = 1024 * 1024;

/// Why an upload was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadErrorKind {
    Type,
    Size,
    Missing,
    Config,
}

impl UploadErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Size => "size",
            Self::Missing => "missing",
            Self::Config => "config",
        }
    }
}

/// User-displayable validation failure
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message}")]
pub struct UploadError {
    pub kind: UploadErrorKind,
    pub message: String,
}

impl UploadError {
    pub fn new(kind: UploadErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadPurpose {
    Resume,
    Attachment,
    Image,
}

impl FromStr for UploadPurpose {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "resume" => Ok(Self::Resume),
            "attachment" => Ok(Self::Attachment),
            "image" => Ok(Self::Image),
            other => Err(UploadError::new(
                UploadErrorKind::Config,
                format!("No upload rules configured for '{}'", other),
            )),
        }
    }
}

impl fmt::Display for UploadPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resume => write!(f, "resume"),
            Self::Attachment => write!(f, "attachment"),
            Self::Image => write!(f, "image"),
        }
    }
}

/// Allow-lists and size limits for one upload purpose
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRules {
    pub extensions: &'static [&'static str],
    pub mime_types: &'static [&'static str],
    pub max_file_size: u64,
    /// Limit on the combined size of a batch, if any
    pub max_total_size: Option<u64>,
}

const DOC_MIME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

static RESUME_RULES: UploadRules = UploadRules {
    extensions: &["pdf", "doc", "docx"],
    mime_types: &DOC_MIME_TYPES,
    max_file_size: 5 * MB,
    max_total_size: None,
};

static ATTACHMENT_RULES: UploadRules = UploadRules {
    extensions: &["pdf", "doc", "docx", "txt", "png", "jpg", "jpeg"],
    mime_types: &[
        "application/pdf",
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "text/plain",
        "image/png",
        "image/jpeg",
    ],
    max_file_size: 10 * MB,
    max_total_size: Some(50 * MB),
};

static IMAGE_RULES: UploadRules = UploadRules {
    extensions: &["jpg", "jpeg", "png", "gif", "webp"],
    mime_types: &["image/jpeg", "image/png", "image/gif", "image/webp"],
    max_file_size: 5 * MB,
    max_total_size: None,
};

impl UploadPurpose {
    pub fn rules(&self) -> &'static UploadRules {
        match self {
            Self::Resume => &RESUME_RULES,
            Self::Attachment => &ATTACHMENT_RULES,
            Self::Image => &IMAGE_RULES,
        }
    }
}

/// A file offered for upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFile {
    pub name: String,
    pub size: u64,
    /// Declared MIME type; empty when the client did not send one
    #[serde(default)]
    pub mime_type: String,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }

    /// Describe a local file, guessing its MIME type from the extension
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = tokio::fs::metadata(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = guess_mime_type(&name);
        Ok(Self::new(name, metadata.len(), mime_type))
    }
}

/// Describe local files for batch validation. Paths that cannot be read
/// become `Missing` rejections instead of stopping the batch.
pub async fn describe_paths(paths: &[PathBuf]) -> (Vec<UploadFile>, Vec<FileRejection>) {
    let mut files = Vec::with_capacity(paths.len());
    let mut unreadable = Vec::new();

    for path in paths {
        match UploadFile::from_path(path).await {
            Ok(file) => files.push(file),
            Err(e) => unreadable.push(FileRejection {
                file: path.display().to_string(),
                error: UploadError::new(
                    UploadErrorKind::Missing,
                    format!("{}: cannot read file ({})", path.display(), e),
                ),
            }),
        }
    }

    (files, unreadable)
}

/// Outcome of validating several files at once
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchValidation {
    pub valid: Vec<UploadFile>,
    pub errors: Vec<FileRejection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRejection {
    /// File name, or empty for batch-level failures
    pub file: String,
    pub error: UploadError,
}

impl BatchValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn validate_upload(file: Option<&UploadFile>, purpose: UploadPurpose) -> Result<(), UploadError> {
    let file = file.ok_or_else(|| UploadError::new(UploadErrorKind::Missing, "Please select a file to upload"))?;
    let rules = purpose.rules();

    let extension = extension_of(&file.name).unwrap_or_default();
    let mime_type = file.mime_type.trim().to_lowercase();
    let type_allowed = rules.extensions.contains(&extension.as_str())
        && (mime_type.is_empty() || rules.mime_types.contains(&mime_type.as_str()));

    if !type_allowed {
        return Err(UploadError::new(
            UploadErrorKind::Type,
            format!(
                "{}: unsupported file type. Allowed types: {}",
                file.name,
                rules.extensions.join(", ")
            ),
        ));
    }

    if file.size > rules.max_file_size {
        return Err(UploadError::new(
            UploadErrorKind::Size,
            format!(
                "{}: file is too large ({}). Maximum size is {}",
                file.name,
                format_size(file.size),
                format_size(rules.max_file_size)
            ),
        ));
    }

    Ok(())
}

/// Validate every file independently; one bad file does not stop the rest
pub fn validate_batch(files: &[UploadFile], purpose: UploadPurpose) -> BatchValidation {
    let mut result = BatchValidation::default();

    for file in files {
        match validate_upload(Some(file), purpose) {
            Ok(()) => result.valid.push(file.clone()),
            Err(error) => result.errors.push(FileRejection {
                file: file.name.clone(),
                error,
            }),
        }
    }

    if let Some(max_total) = purpose.rules().max_total_size {
        let total: u64 = files.iter().map(|f| f.size).sum();
        if total > max_total {
            result.errors.push(FileRejection {
                file: String::new(),
                error: UploadError::new(
                    UploadErrorKind::Size,
                    format!(
                        "Total upload size {} exceeds the {} limit",
                        format_size(total),
                        format_size(max_total)
                    ),
                ),
            });
        }
    }

    result
}

/// Human-readable byte count
pub fn format_size(bytes: u64) -> String {
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = validate_upload(None, UploadPurpose::Resume).unwrap_err();
        assert_eq!(err.kind, UploadErrorKind::Missing);
    }

    #[test]
    fn test_unknown_purpose_is_config_error() {
        let err = "video".parse::<UploadPurpose>().unwrap_err();
        assert_eq!(err.kind, UploadErrorKind::Config);
        assert_eq!("Image".parse::<UploadPurpose>().unwrap(), UploadPurpose::Image);
    }

    #[test]
    fn test_type_checks_extension_and_mime() {
        let ok = UploadFile::new("cv.PDF", 1024, "application/pdf");
        assert!(validate_upload(Some(&ok), UploadPurpose::Resume).is_ok());

        let no_mime = UploadFile::new("cv.docx", 1024, "");
        assert!(validate_upload(Some(&no_mime), UploadPurpose::Resume).is_ok());

        let wrong_ext = UploadFile::new("cv.png", 1024, "image/png");
        let err = validate_upload(Some(&wrong_ext), UploadPurpose::Resume).unwrap_err();
        assert_eq!(err.kind, UploadErrorKind::Type);

        let spoofed = UploadFile::new("cv.pdf", 1024, "application/x-msdownload");
        let err = validate_upload(Some(&spoofed), UploadPurpose::Resume).unwrap_err();
        assert_eq!(err.kind, UploadErrorKind::Type);
    }

    #[test]
    fn test_size_limits() {
        let at_limit = UploadFile::new("me.png", 5 * MB, "image/png");
        assert!(validate_upload(Some(&at_limit), UploadPurpose::Image).is_ok());

        let too_big = UploadFile::new("me.png", 5 * MB + 1, "image/png");
        let err = validate_upload(Some(&too_big), UploadPurpose::Image).unwrap_err();
        assert_eq!(err.kind, UploadErrorKind::Size);
        assert!(err.message.contains("5.0 MB"));

        let attachment = UploadFile::new("spec.pdf", 8 * MB, "application/pdf");
        assert!(validate_upload(Some(&attachment), UploadPurpose::Attachment).is_ok());
    }

    #[test]
    fn test_batch_continues_after_failures() {
        let files = vec![
            UploadFile::new("a.pdf", MB, "application/pdf"),
            UploadFile::new("b.exe", MB, "application/octet-stream"),
            UploadFile::new("c.txt", 11 * MB, "text/plain"),
            UploadFile::new("d.jpg", MB, "image/jpeg"),
        ];
        let result = validate_batch(&files, UploadPurpose::Attachment);

        assert!(!result.is_valid());
        assert_eq!(result.valid.len(), 2);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].file, "b.exe");
        assert_eq!(result.errors[0].error.kind, UploadErrorKind::Type);
        assert_eq!(result.errors[1].error.kind, UploadErrorKind::Size);
    }

    #[test]
    fn test_error_displays_message() {
        let err = validate_upload(None, UploadPurpose::Image).unwrap_err();
        assert_eq!(err.to_string(), "Please select a file to upload");
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert_eq!(boxed.to_string(), "Please select a file to upload");
    }

    #[tokio::test]
    async fn test_unreadable_paths_do_not_stop_the_batch() {
        let dir = tempfile::TempDir::new().unwrap();
        let present = dir.path().join("ok.pdf");
        std::fs::write(&present, b"%PDF-1.4").unwrap();
        let absent = dir.path().join("missing.pdf");

        let (files, unreadable) = describe_paths(&[present, absent.clone()]).await;
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "ok.pdf");
        assert_eq!(files[0].mime_type, "application/pdf");

        assert_eq!(unreadable.len(), 1);
        assert_eq!(unreadable[0].file, absent.display().to_string());
        assert_eq!(unreadable[0].error.kind, UploadErrorKind::Missing);

        let result = validate_batch(&files, UploadPurpose::Attachment);
        assert_eq!(result.valid.len(), 1);
    }

    #[test]
    fn test_batch_aggregate_limit() {
        let files: Vec<UploadFile> = (0..6)
            .map(|i| UploadFile::new(format!("part{}.pdf", i), 9 * MB, "application/pdf"))
            .collect();
        let result = validate_batch(&files, UploadPurpose::Attachment);

        assert_eq!(result.valid.len(), 6);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].file.is_empty());
        assert_eq!(result.errors[0].error.kind, UploadErrorKind::Size);
    }
}
