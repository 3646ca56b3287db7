use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{PatchAssignment, SearchPage};
use crate::query::SearchParams;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("timeout")]
    Timeout,
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Port over the two upstream services the worktray talks to: the search
/// service and the patches/areas lookup.
#[async_trait]
pub trait WorktrayClient: Send + Sync {
    /// One page of process records matching the derived parameter set,
    /// plus the total match count.
    async fn search_processes(&self, params: &SearchParams) -> ClientResult<SearchPage>;

    /// Resolve the patch assigned to the given staff email, or `None` when
    /// nobody holds a patch for that address.
    async fn resolve_patch(&self, email: &str) -> ClientResult<Option<PatchAssignment>>;
}
