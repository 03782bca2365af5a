use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Path is empty")]
    Empty,

    #[error("Path '{0}' contains an empty segment")]
    EmptySegment(String),

    #[error("Document path '{0}' must have the form <collection>/<document>")]
    NotADocument(String),
}

/// Normalise a collection path: trims surrounding slashes, rejects empty segments
pub fn collection_path(path: &str) -> Result<String, PathError> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }
    if trimmed.split('/').any(|segment| segment.trim().is_empty()) {
        return Err(PathError::EmptySegment(path.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Split a document path into (parent collection path, document id)
pub fn split_document_path(path: &str) -> Result<(String, String), PathError> {
    let normalized = collection_path(path)?;
    match normalized.rsplit_once('/') {
        Some((parent, id)) => Ok((parent.to_string(), id.to_string())),
        None => Err(PathError::NotADocument(path.to_string())),
    }
}
