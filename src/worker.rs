use std::sync::Arc;

use tokio::sync::mpsc;

use crate::action::Action;
use crate::client::WorktrayClient;
use crate::query::SearchParams;

/// A fetch request for one parameter set. The ticket travels with the
/// request and comes back in the response action; the app only applies
/// responses carrying its current ticket, which is what turns overlapping
/// fetches into last-request-wins.
#[derive(Debug)]
pub struct SearchRequest {
    pub ticket: u64,
    pub params: SearchParams,
}

#[derive(Clone)]
pub struct SearchHandle {
    tx: mpsc::UnboundedSender<SearchRequest>,
}

impl SearchHandle {
    pub fn send(&self, request: SearchRequest) {
        let _ = self.tx.send(request);
    }
}

pub struct SearchWorker {
    client: Arc<dyn WorktrayClient>,
    rx: mpsc::UnboundedReceiver<SearchRequest>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl SearchWorker {
    pub fn new(
        client: Arc<dyn WorktrayClient>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> (Self, SearchHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = SearchHandle { tx };
        let worker = Self {
            client,
            rx,
            action_tx,
        };
        (worker, handle)
    }

    pub async fn run(mut self) {
        while let Some(request) = self.rx.recv().await {
            let action = self.process(request).await;
            if self.action_tx.send(action).is_err() {
                break;
            }
        }
    }

    async fn process(&self, request: SearchRequest) -> Action {
        let SearchRequest { ticket, params } = request;
        tracing::debug!(ticket, page = params.page, "searching processes");
        match self.client.search_processes(&params).await {
            Ok(page) => {
                tracing::debug!(ticket, total = page.total, "search resolved");
                Action::ResultsLoaded { ticket, page }
            }
            Err(err) => {
                tracing::warn!(ticket, %err, "search failed");
                Action::FetchFailed {
                    ticket,
                    message: format!("failed to load worktray: {}", err),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::client::{ClientError, ClientResult};
    use crate::domain::{PatchAssignment, SearchPage};
    use crate::query::QueryState;

    struct ScriptedClient {
        fail: bool,
        total: u64,
    }

    #[async_trait]
    impl WorktrayClient for ScriptedClient {
        async fn search_processes(&self, _params: &SearchParams) -> ClientResult<SearchPage> {
            if self.fail {
                Err(ClientError::RequestFailed("503".into()))
            } else {
                Ok(SearchPage {
                    processes: vec![],
                    total: self.total,
                })
            }
        }

        async fn resolve_patch(&self, _email: &str) -> ClientResult<Option<PatchAssignment>> {
            Ok(None)
        }
    }

    fn spawn_worker(client: ScriptedClient) -> (SearchHandle, mpsc::UnboundedReceiver<Action>) {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (worker, handle) = SearchWorker::new(Arc::new(client), action_tx);
        tokio::spawn(worker.run());
        (handle, action_rx)
    }

    #[tokio::test]
    async fn worker_echoes_the_request_ticket() {
        let (handle, mut actions) = spawn_worker(ScriptedClient {
            fail: false,
            total: 12,
        });

        handle.send(SearchRequest {
            ticket: 7,
            params: QueryState::default().search_params(),
        });

        match actions.recv().await {
            Some(Action::ResultsLoaded { ticket, page }) => {
                assert_eq!(ticket, 7);
                assert_eq!(page.total, 12);
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[tokio::test]
    async fn worker_reports_failures_with_the_ticket() {
        let (handle, mut actions) = spawn_worker(ScriptedClient {
            fail: true,
            total: 0,
        });

        handle.send(SearchRequest {
            ticket: 3,
            params: QueryState::default().search_params(),
        });

        match actions.recv().await {
            Some(Action::FetchFailed { ticket, message }) => {
                assert_eq!(ticket, 3);
                assert!(message.contains("request failed"));
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }
}
