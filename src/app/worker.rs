// src/app/worker.rs
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use tracing::{info, warn};

use super::api::{ApiError, FilmApi};
use super::data::{Film, FilmId};

// ---- cross-thread messages ----
#[derive(Clone, Debug, PartialEq)]
pub enum ApiRequest {
    List,
    Create(Film),
    Update { id: FilmId, film: Film },
    Delete(FilmId),
}

#[derive(Debug)]
pub enum ApiOutcome {
    Listed(Result<Vec<Film>, ApiError>),
    Created(Result<Film, ApiError>),
    Updated(Result<Film, ApiError>),
    Deleted { id: FilmId, result: Result<(), ApiError> },
}

impl ApiRequest {
    /// Run the request on the calling thread.
    pub fn execute(self, api: &dyn FilmApi) -> ApiOutcome {
        match self {
            Self::List => ApiOutcome::Listed(api.list()),
            Self::Create(film) => ApiOutcome::Created(api.create(&film)),
            Self::Update { id, film } => ApiOutcome::Updated(api.update(id, &film)),
            Self::Delete(id) => ApiOutcome::Deleted {
                id,
                result: api.delete(id),
            },
        }
    }
}

/// One background thread that executes requests in arrival order.
pub struct ApiWorker {
    work_tx: Sender<ApiRequest>,
    done_rx: Receiver<ApiOutcome>,
}

impl ApiWorker {
    /// `notify` runs after every finished request (used to wake the UI).
    pub fn spawn<A, F>(api: A, notify: F) -> std::io::Result<Self>
    where
        A: FilmApi + 'static,
        F: Fn() + Send + 'static,
    {
        let (work_tx, work_rx) = mpsc::channel::<ApiRequest>();
        let (done_tx, done_rx) = mpsc::channel::<ApiOutcome>();

        thread::Builder::new()
            .name("films-api".into())
            .spawn(move || {
                for req in work_rx {
                    let outcome = req.execute(&api);
                    if done_tx.send(outcome).is_err() {
                        break;
                    }
                    notify();
                }
                info!("api worker stopped");
            })?;

        Ok(Self { work_tx, done_rx })
    }

    pub fn submit(&self, req: ApiRequest) {
        if self.work_tx.send(req).is_err() {
            warn!("api worker is gone; request dropped");
        }
    }

    /// Drain at most `max` finished requests without blocking.
    pub fn poll(&self, max: usize) -> Vec<ApiOutcome> {
        let mut out = Vec::new();
        while out.len() < max {
            match self.done_rx.try_recv() {
                Ok(outcome) => out.push(outcome),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("api worker disconnected");
                    break;
                }
            }
        }
        out
    }
}
