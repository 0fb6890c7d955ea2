//! Persists rendered documents as `<out_dir>/<identifier>`.
use std::path::{Path, PathBuf};

use crate::error::WriteError;
use crate::select::RenderedDocument;

/// Writes each document verbatim and returns the paths in input order.
/// `out_dir` (and its parents) are created if missing.
pub fn write_documents(out_dir: &Path, documents: &[RenderedDocument]) -> Result<Vec<PathBuf>, WriteError> {
    std::fs::create_dir_all(out_dir).map_err(|source| WriteError {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let mut written = Vec::with_capacity(documents.len());
    for doc in documents {
        let path = out_dir.join(&doc.identifier);
        std::fs::write(&path, &doc.content).map_err(|source| WriteError {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = doc.content.len(), "wrote document");
        written.push(path);
    }
    Ok(written)
}
