use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{Patch, PatchAssignment, ProcessRecord, SearchPage};
use crate::query::SearchParams;

use super::{ClientError, ClientResult, WorktrayClient};

/// REST implementation over the search and patches services.
pub struct HttpWorktrayClient {
    http: reqwest::Client,
    search_api_url: String,
    patches_api_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    #[serde(default)]
    processes: Vec<ProcessRecord>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: SearchResults,
    total: u64,
}

impl HttpWorktrayClient {
    pub fn new(search_api_url: String, patches_api_url: String) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|err| ClientError::ConnectionError(err.to_string()))?;
        Ok(Self {
            http,
            search_api_url: search_api_url.trim_end_matches('/').to_string(),
            patches_api_url: patches_api_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ClientError::Timeout
                } else {
                    ClientError::ConnectionError(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::RequestFailed(format!(
                "{} returned {}",
                url, status
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| ClientError::ParseError(err.to_string()))
    }
}

#[async_trait]
impl WorktrayClient for HttpWorktrayClient {
    async fn search_processes(&self, params: &SearchParams) -> ClientResult<SearchPage> {
        let url = format!("{}/search/processes", self.search_api_url);
        let pairs = params.to_query_pairs();
        let response: SearchResponse = self.get_json(&url, &pairs).await?;
        Ok(SearchPage {
            processes: response.results.processes,
            total: response.total,
        })
    }

    async fn resolve_patch(&self, email: &str) -> ClientResult<Option<PatchAssignment>> {
        let url = format!("{}/patch/all", self.patches_api_url);
        let patches: Vec<Patch> = self.get_json(&url, &[]).await?;
        let assigned = patches.into_iter().find(|patch| {
            patch
                .responsible_email()
                .is_some_and(|address| address.eq_ignore_ascii_case(email))
        });
        Ok(assigned.map(|patch| PatchAssignment {
            patch_id: patch.id,
            area_id: patch.parent_id,
        }))
    }
}
