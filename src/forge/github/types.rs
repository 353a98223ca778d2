//! REST payloads for the git data API.
use serde::{Deserialize, Serialize};

pub const TREE_BLOB_MODE: &str = "100644";
pub const TREE_BLOB_TYPE: &str = "blob";

#[derive(Debug, Serialize)]
pub struct GithubTreeEntry {
    pub path: String,
    pub mode: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl GithubTreeEntry {
    /// Blob entry replacing the file at `path` with `content`.
    pub fn blob(path: &str, content: String) -> Self {
        Self {
            path: path.strip_prefix("./").unwrap_or(path).to_string(),
            mode: TREE_BLOB_MODE.into(),
            kind: TREE_BLOB_TYPE.into(),
            content,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GithubTree {
    pub base_tree: String,
    pub tree: Vec<GithubTreeEntry>,
}

#[derive(Debug, Deserialize)]
pub struct Tree {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
pub struct GitCommit {
    pub sha: String,
}
