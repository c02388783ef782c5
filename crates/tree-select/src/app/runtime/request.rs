use crate::app::{CancelAction, DialogRequest, DoneAction, TreeNode};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// On-disk form of a dialog request. Actions cannot be serialized, so only their
/// labels travel in the document; the caller binds behaviour in
/// [`RequestDocument::into_request`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RequestDocument {
    pub title: Option<String>,
    pub message: Option<String>,
    pub options: Vec<TreeNode>,
    pub done_label: Option<String>,
    pub cancel_label: Option<String>,
}

#[derive(Debug)]
pub enum RequestError {
    MissingPath,
    Io { path: String, message: String },
    Parse(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::MissingPath => {
                write!(f, "no request given (pass --request <path> or --demo)")
            }
            RequestError::Io { path, message } => {
                write!(f, "failed to read request {path}: {message}")
            }
            RequestError::Parse(message) => write!(f, "invalid request: {message}"),
        }
    }
}

impl std::error::Error for RequestError {}

pub fn parse_request_document(text: &str) -> Result<RequestDocument, RequestError> {
    serde_json::from_str(text).map_err(|error| RequestError::Parse(error.to_string()))
}

pub fn load_request_document(path: &Path) -> Result<RequestDocument, RequestError> {
    let text = fs::read_to_string(path).map_err(|error| RequestError::Io {
        path: path.display().to_string(),
        message: error.to_string(),
    })?;
    parse_request_document(&text)
}

impl RequestDocument {
    pub fn into_request(
        self,
        on_done: impl FnOnce(Vec<String>) -> crate::app::ActionResult + 'static,
        on_cancel: impl FnOnce() -> crate::app::ActionResult + 'static,
    ) -> DialogRequest {
        let done_label = self
            .done_label
            .unwrap_or_else(|| crate::app::DEFAULT_DONE_LABEL.to_string());
        let cancel_label = self
            .cancel_label
            .unwrap_or_else(|| crate::app::DEFAULT_CANCEL_LABEL.to_string());
        DialogRequest {
            title: self.title,
            message: self.message,
            options: self.options,
            on_cancel: Some(CancelAction::cancel(cancel_label, on_cancel)),
            on_done: Some(DoneAction::done(done_label, on_done)),
        }
    }
}
