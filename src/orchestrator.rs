// src/orchestrator.rs
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use crate::analysis::{call_backend, AnalysisResult, StatementBackend};
use crate::error::{BackendError, OrchestratorError};
use crate::file::{FileFilter, FilePicker};
use crate::state::{ResultsView, ViewState};
use crate::ui::render::render;

/// Where the backend call runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// On the calling thread; the outcome is final.
    Inline,
    /// On a worker thread; the final outcome comes from [`AnalysisOrchestrator::poll`].
    Background,
}

/// What happened to a request, for the hosting UI to present.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(ResultsView),
    Pending,
    Cancelled,
    Error(OrchestratorError),
}

type WorkerResult = Result<AnalysisResult, BackendError>;

/// Resolves a statement path, runs the backend on it and keeps the view
/// state in step. At most one request is in flight at a time.
pub struct AnalysisOrchestrator {
    picker: Box<dyn FilePicker>,
    backend: Arc<dyn StatementBackend>,
    filter: FileFilter,
    view: ViewState,
    in_flight: Option<Receiver<WorkerResult>>,
}

impl AnalysisOrchestrator {
    pub fn new(picker: Box<dyn FilePicker>, backend: Arc<dyn StatementBackend>, filter: FileFilter) -> Self {
        Self {
            picker,
            backend,
            filter,
            view: ViewState::default(),
            in_flight: None,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn filter(&self) -> &FileFilter {
        &self.filter
    }

    pub fn is_busy(&self) -> bool {
        self.view.is_busy()
    }

    pub fn picker_available(&self) -> bool {
        self.picker.is_available()
    }

    /// `Ok(None)` when the user dismissed the dialog.
    pub fn select_via_picker(&self) -> Result<Option<PathBuf>, OrchestratorError> {
        let selection = self.picker.pick_file(&self.filter)?;
        match &selection {
            Some(path) => tracing::debug!(path = %path.display(), "file picked"),
            None => tracing::debug!("file dialog cancelled"),
        }
        Ok(selection)
    }

    pub fn select_via_manual(&self, input: &str) -> Result<PathBuf, OrchestratorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(OrchestratorError::NoFileSelected);
        }
        Ok(PathBuf::from(input))
    }

    pub fn analyze_via_picker(&mut self, dispatch: Dispatch) -> Outcome {
        if self.is_busy() {
            return Outcome::Error(OrchestratorError::Busy);
        }

        match self.select_via_picker() {
            Ok(Some(path)) => self.run_analysis(path, dispatch),
            Ok(None) => Outcome::Cancelled,
            Err(e) => Outcome::Error(e),
        }
    }

    pub fn analyze_via_manual(&mut self, input: &str, dispatch: Dispatch) -> Outcome {
        if self.is_busy() {
            return Outcome::Error(OrchestratorError::Busy);
        }

        match self.select_via_manual(input) {
            Ok(path) => self.run_analysis(path, dispatch),
            Err(e) => Outcome::Error(e),
        }
    }

    /// Runs the backend on `path`. Every exit path leaves the busy state,
    /// including a backend that panics.
    pub fn run_analysis(&mut self, path: PathBuf, dispatch: Dispatch) -> Outcome {
        if self.is_busy() {
            return Outcome::Error(OrchestratorError::Busy);
        }
        self.view.enter_busy();

        match dispatch {
            Dispatch::Inline => {
                let result = call_backend(self.backend.as_ref(), &path);
                self.complete(result)
            }
            Dispatch::Background => self.spawn_worker(path),
        }
    }

    /// Checks on a background request. Returns `None` while it is still running
    /// or when nothing was dispatched.
    pub fn poll(&mut self) -> Option<Outcome> {
        let receiver = self.in_flight.as_ref()?;
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(BackendError::new(
                "analysis worker stopped before returning a result",
            )),
        };

        self.in_flight = None;
        Some(self.complete(result))
    }

    fn spawn_worker(&mut self, path: PathBuf) -> Outcome {
        let (sender, receiver) = mpsc::channel();
        let backend = Arc::clone(&self.backend);

        let spawned = thread::Builder::new()
            .name("statement-analysis".to_string())
            .spawn(move || {
                let result = call_backend(backend.as_ref(), &path);
                // The orchestrator may have been dropped meanwhile.
                let _ = sender.send(result);
            });

        match spawned {
            Ok(_) => {
                self.in_flight = Some(receiver);
                Outcome::Pending
            }
            Err(e) => self.complete(Err(BackendError::new(format!(
                "could not start analysis worker: {}",
                e
            )))),
        }
    }

    fn complete(&mut self, result: WorkerResult) -> Outcome {
        match result {
            Ok(analysis) => {
                let results = render(&analysis);
                self.view.finish_success(results.clone());
                Outcome::Success(results)
            }
            Err(e) => {
                self.view.finish_failure();
                Outcome::Error(e.into())
            }
        }
    }
}
