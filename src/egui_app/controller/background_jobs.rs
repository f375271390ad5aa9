use super::jobs::JobMessage;
use super::*;

impl EguiController {
    /// Drain worker messages; called once per frame before rendering.
    pub(crate) fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(
                    std::sync::mpsc::TryRecvError::Empty
                    | std::sync::mpsc::TryRecvError::Disconnected,
                ) => {
                    break;
                }
            };

            match message {
                JobMessage::PredictFinished(outcome) => {
                    if outcome.generation != self.jobs.latest_generation() {
                        tracing::info!(
                            generation = outcome.generation,
                            latest = self.jobs.latest_generation(),
                            "dropping stale prediction response"
                        );
                        continue;
                    }
                    self.jobs.clear_predict();
                    self.ui.form.submitting = false;
                    match outcome.result {
                        Ok(results) => self.apply_prediction_results(results),
                        Err(err) => {
                            self.ui.form.last_error = Some(err.to_string());
                            self.set_status(
                                format!("Prediction failed: {err}"),
                                StatusTone::Error,
                            );
                        }
                    }
                }
            }
        }
    }

    fn apply_prediction_results(&mut self, results: crate::prediction::ResultSet) {
        let model_count = results.len();
        self.ui.form.results = results;
        self.ui.form.results_revision = self.ui.form.results_revision.wrapping_add(1);
        self.ui.form.last_error = None;
        let noun = if model_count == 1 { "model" } else { "models" };
        self.set_status(
            format!("Predictions received from {model_count} {noun}"),
            StatusTone::Info,
        );
    }
}
