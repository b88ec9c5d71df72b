use crate::{
    config::Limits,
    media::{MediaInput, MediaKind},
    util::format_megabytes,
};

const MIB: u64 = 1024 * 1024;

/// Pre-analysis rejections. Both leave the caller's prior state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unsupported file type: {mime_type}")]
    UnsupportedType { mime_type: String },
    #[error("file too large: {size_bytes} bytes (limit {limit_bytes})")]
    TooLarge { size_bytes: u64, limit_bytes: u64 },
}

impl ValidationError {
    pub fn title(&self) -> &'static str {
        match self {
            Self::UnsupportedType { .. } => "Unsupported file type",
            Self::TooLarge { .. } => "File too large",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedType { .. } => "Please upload an image or video file.".into(),
            Self::TooLarge { limit_bytes, .. } => {
                format!("Please upload a file smaller than {}.", limit_label(*limit_bytes))
            }
        }
    }
}

/// Type check first, then size.
pub fn validate(limits: &Limits, input: &MediaInput) -> Result<MediaKind, ValidationError> {
    let kind = MediaKind::from_mime(&input.mime_type).ok_or_else(|| {
        ValidationError::UnsupportedType {
            mime_type: input.mime_type.clone(),
        }
    })?;

    if input.size_bytes > limits.max_input_file_bytes {
        return Err(ValidationError::TooLarge {
            size_bytes: input.size_bytes,
            limit_bytes: limits.max_input_file_bytes,
        });
    }

    Ok(kind)
}

/// Whole mebibytes read as `10MB`; anything else falls back to two decimals.
fn limit_label(limit_bytes: u64) -> String {
    if limit_bytes >= MIB && limit_bytes % MIB == 0 {
        format!("{}MB", limit_bytes / MIB)
    } else {
        format_megabytes(limit_bytes)
    }
}
