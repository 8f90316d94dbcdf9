// src/integrations/fetch.rs
//
// Polled request handle
//
// A FetchHandle starts out loading and settles exactly once, into either
// data or an error summary. Callers read the fields (or await `finished`);
// a failed request never surfaces as an Err in their control flow.

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use log::error;
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::application::error_handling::{ErrorResponse, ErrorType};
use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Loaded(T),
    Failed(ErrorResponse),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

pub struct FetchHandle<T> {
    state: Arc<RwLock<FetchState<T>>>,
    done: watch::Receiver<bool>,
}

impl<T> FetchHandle<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Start `request` on `runtime`. The request is never cancelled, even if
    /// the handle is dropped.
    pub fn spawn<Fut>(runtime: &Handle, request: Fut) -> Self
    where
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        let state = Arc::new(RwLock::new(FetchState::Loading));
        let (done_tx, done_rx) = watch::channel(false);

        let task_state = Arc::clone(&state);
        runtime.spawn(async move {
            let settled = match request.await {
                Ok(data) => FetchState::Loaded(data),
                Err(e) => FetchState::Failed(ErrorResponse::from_app_error(&e)),
            };
            *task_state.write().unwrap_or_else(PoisonError::into_inner) = settled;
            let _ = done_tx.send(true);
        });

        Self {
            state,
            done: done_rx,
        }
    }

    pub fn state(&self) -> FetchState<T> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Parsed data; `None` while loading or after a failure
    pub fn data(&self) -> Option<T> {
        match self.state() {
            FetchState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<ErrorResponse> {
        match self.state() {
            FetchState::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        !self.state.read().unwrap_or_else(PoisonError::into_inner).is_loading()
    }

    pub fn is_loading(&self) -> bool {
        !self.is_finished()
    }

    /// Wait until the request settles and return the final state.
    pub async fn finished(&self) -> FetchState<T> {
        let mut done = self.done.clone();
        if done.wait_for(|finished| *finished).await.is_err() {
            // Sender dropped without settling: the request task panicked
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if state.is_loading() {
                error!("Request task ended without a result");
                *state = FetchState::Failed(ErrorResponse {
                    error_type: ErrorType::Internal,
                    message: "Request ended unexpectedly".to_string(),
                    details: None,
                });
            }
        }
        self.state()
    }
}
