use crate::{
    config::Hashing,
    media::{MediaInput, MediaKind},
    util::{format_megabytes, hash_file},
};
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Displayable handle for a validated file. Not part of the analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preview {
    pub kind: MediaKind,
    pub uri: String,
    pub fingerprint: String,
    pub size_label: String,
}

pub fn build(hashing: &Hashing, path: &Path, input: &MediaInput, kind: MediaKind) -> Result<Preview> {
    let canon = path
        .canonicalize()
        .with_context(|| format!("canonicalize input: {}", path.display()))?;
    let fingerprint = hash_file(hashing, &canon)
        .with_context(|| format!("hashing input: {}", canon.display()))?;

    Ok(Preview {
        kind,
        uri: file_uri(&canon)?,
        fingerprint,
        size_label: format_megabytes(input.size_bytes),
    })
}

fn file_uri(canon: &Path) -> Result<String> {
    Url::from_file_path(canon)
        .map(String::from)
        .map_err(|()| anyhow!("cannot express as file URI: {}", canon.display()))
}
