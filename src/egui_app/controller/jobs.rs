//! Background job plumbing for the controller.
//!
//! The prediction call runs on a worker thread and reports back through an
//! mpsc channel drained once per frame. Every submission is stamped with a
//! generation; only the response carrying the newest generation may mutate
//! the result state, so overlapping submissions resolve deterministically.

use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::prediction::api::{self, PredictError, ResultSet};
use crate::prediction::fields::NumericPayload;
use crate::prediction::models::ModelSelection;

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    PredictFinished(PredictOutcome),
}

/// Result of one prediction worker, tagged with its submission generation.
pub(crate) struct PredictOutcome {
    pub(crate) generation: u64,
    pub(crate) result: Result<ResultSet, PredictError>,
}

pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    latest_generation: u64,
    predict_in_flight: bool,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            latest_generation: 0,
            predict_in_flight: false,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    #[cfg(test)]
    pub(super) fn message_sender(&self) -> Sender<JobMessage> {
        self.message_tx.clone()
    }

    /// Spawn a prediction worker for a new submission.
    ///
    /// A resubmit supersedes the outstanding request: the new generation
    /// becomes the latest and any older response is dropped on arrival.
    pub(super) fn begin_predict(
        &mut self,
        endpoint: String,
        payload: NumericPayload,
        selection: ModelSelection,
    ) -> u64 {
        let generation = self.next_generation();
        self.predict_in_flight = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api::predict(&endpoint, &payload, &selection);
            let _ = tx.send(JobMessage::PredictFinished(PredictOutcome {
                generation,
                result,
            }));
        });
        generation
    }

    pub(super) fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    pub(super) fn predict_in_flight(&self) -> bool {
        self.predict_in_flight
    }

    pub(super) fn clear_predict(&mut self) {
        self.predict_in_flight = false;
    }

    fn next_generation(&mut self) -> u64 {
        self.latest_generation += 1;
        self.latest_generation
    }

    /// Register a submission without spawning a worker. Lets tests feed
    /// outcomes through the channel deterministically.
    #[cfg(test)]
    pub(super) fn mark_submitted(&mut self) -> u64 {
        let generation = self.next_generation();
        self.predict_in_flight = true;
        generation
    }
}
