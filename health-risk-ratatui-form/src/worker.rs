//! Background submission so the form keeps redrawing while a request is in flight.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use health_risk::{PredictionRequest, Predictor, RiskPrediction};

/// Handle to a running submission.
pub struct WorkerHandle {
    outcome_rx: Receiver<Result<RiskPrediction, anyhow::Error>>,
    _handle: JoinHandle<()>,
}

impl WorkerHandle {
    /// Take the outcome if the request has finished (non-blocking).
    ///
    /// A worker that died without reporting counts as a failed request.
    #[must_use]
    pub fn try_recv(&self) -> Option<Result<RiskPrediction, anyhow::Error>> {
        match self.outcome_rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(anyhow::anyhow!(
                "submission worker exited without a result"
            ))),
        }
    }

    /// Block until the request finishes.
    pub fn wait(self) -> Result<RiskPrediction, anyhow::Error> {
        self.outcome_rx
            .recv()
            .unwrap_or_else(|_| Err(anyhow::anyhow!("submission worker exited without a result")))
    }
}

/// Runs one prediction request on its own thread.
pub struct SubmissionWorker;

impl SubmissionWorker {
    pub fn spawn<P>(predictor: Arc<P>, request: PredictionRequest) -> WorkerHandle
    where
        P: Predictor + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let outcome: Result<RiskPrediction, anyhow::Error> =
                predictor.predict(&request).map_err(Into::into);
            // The receiver is gone if the form was closed mid-request
            let _ = tx.send(outcome);
        });

        WorkerHandle {
            outcome_rx: rx,
            _handle: handle,
        }
    }
}
