use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::CompletionClient;
use crate::domain::{CompletionRequest, DomainError};

/// A scripted [`CompletionClient`] that replays queued outcomes in order and
/// records every request it receives.
///
/// Once the script is exhausted every further call fails with
/// [`DomainError::Provider`].
pub struct MockCompletionClient {
    script: Mutex<VecDeque<Result<String, DomainError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_reply(mut self, text: impl Into<String>) -> Self {
        self.script.get_mut().push_back(Ok(text.into()));
        self
    }

    pub fn with_error(mut self, error: DomainError) -> Self {
        self.script.get_mut().push_back(Err(error));
        self
    }

    /// Number of `complete` invocations so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(request.clone());

        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(DomainError::provider("mock script exhausted")))
    }
}
