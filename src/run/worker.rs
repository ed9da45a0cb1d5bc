//! Background execution and cooperative cancellation.

use crate::domain::{Manifest, RunConfig, RunEvent};
use crate::error::RunError;
use crate::run::run;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Shared flag a front end sets to stop a run. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A run executing on a worker thread.
///
/// Events arrive in order on [`RunHandle::events`]; the last one is always
/// [`RunEvent::Completed`] or [`RunEvent::Failed`], after which the channel closes.
pub struct RunHandle {
    events: Receiver<RunEvent>,
    cancel: CancelToken,
    worker: JoinHandle<Result<Manifest, RunError>>,
}

impl RunHandle {
    pub fn events(&self) -> &Receiver<RunEvent> {
        &self.events
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Wait for the worker and return its result.
    pub fn join(self) -> Result<Manifest, RunError> {
        self.worker.join().unwrap_or(Err(RunError::WorkerPanicked))
    }
}

/// Start a run over `root` on a background thread.
pub fn spawn_run(root: impl Into<PathBuf>, config: RunConfig) -> io::Result<RunHandle> {
    let root = root.into();
    let (tx, events) = mpsc::channel();
    let cancel = CancelToken::new();
    let token = cancel.clone();

    let worker = thread::Builder::new().name("consolidator-run".to_string()).spawn(move || {
        let mut sink = tx.clone();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| run(&root, &config, &mut sink, &token)));

        let result = outcome.unwrap_or(Err(RunError::WorkerPanicked));
        let terminal = match &result {
            Ok(manifest) => RunEvent::Completed(manifest.clone()),
            Err(err) => RunEvent::Failed(err.to_string()),
        };
        if tx.send(terminal).is_err() {
            tracing::debug!("Run finished after the event receiver was dropped");
        }
        result
    })?;

    Ok(RunHandle { events, cancel, worker })
}
