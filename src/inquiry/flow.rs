//! Submission state machine shared by every inquiry category

use thiserror::Error;
use validator::ValidationErrors;

use super::InquiryForm;
use crate::gateway::{GatewayError, GatewayResult};
use crate::models::Principal;
use crate::queries::{DataAccess, SubmitInquiry};

/// Shown to the customer whenever the gateway call fails
pub const RETRY_MESSAGE: &str = "We couldn't send your inquiry. Please try again.";

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Invalid submission: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("A submission is already in progress")]
    InFlight,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    Editing,
    Submitting,
    Submitted,
    Failed { message: String },
}

/// One form, one control: at most one submission in flight
#[derive(Debug, Clone)]
pub struct SubmissionFlow<F: InquiryForm> {
    form: F,
    state: FlowState,
    reset_on_success: bool,
}

impl<F: InquiryForm> Default for SubmissionFlow<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<F: InquiryForm> SubmissionFlow<F> {
    pub fn new(form: F) -> Self {
        Self {
            form,
            state: FlowState::Editing,
            reset_on_success: false,
        }
    }

    /// Clear the form once a submission succeeds
    pub fn reset_on_success(mut self, reset: bool) -> Self {
        self.reset_on_success = reset;
        self
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn can_submit(&self) -> bool {
        self.state != FlowState::Submitting
    }

    /// Change the form. A failed flow returns to editing.
    pub fn edit(&mut self, change: impl FnOnce(&mut F)) -> Result<(), SubmissionError> {
        if self.state == FlowState::Submitting {
            return Err(SubmissionError::InFlight);
        }
        change(&mut self.form);
        if matches!(self.state, FlowState::Failed { .. }) {
            self.state = FlowState::Editing;
        }
        Ok(())
    }

    /// Validate and enter `Submitting`. On a validation failure the state is
    /// left as it was.
    pub fn begin(&mut self) -> Result<SubmitInquiry, SubmissionError> {
        if self.state == FlowState::Submitting {
            return Err(SubmissionError::InFlight);
        }
        let submission = self.form.to_submission()?;
        self.state = FlowState::Submitting;
        Ok(SubmitInquiry { submission })
    }

    /// Record the gateway outcome of the submission started by [`begin`](Self::begin)
    pub fn finish(&mut self, result: GatewayResult<()>) -> Result<(), SubmissionError> {
        match result {
            Ok(()) => {
                if self.reset_on_success {
                    self.form = F::default();
                }
                self.state = FlowState::Submitted;
                Ok(())
            }
            Err(err) => {
                let category = F::CATEGORY;
                tracing::warn!(category = %category, error = %err, "Inquiry submission failed");
                self.state = FlowState::Failed {
                    message: RETRY_MESSAGE.to_string(),
                };
                Err(SubmissionError::Gateway(err))
            }
        }
    }

    /// Submit the form. If this future is dropped before the gateway answers,
    /// the flow returns to `Editing`; the write itself still completes.
    pub async fn submit(
        &mut self,
        data: &DataAccess,
        caller: &Principal,
    ) -> Result<(), SubmissionError> {
        let mutation = self.begin()?;
        let mut pending = Pending {
            flow: self,
            settled: false,
        };
        let result = data.mutate(caller, mutation).await;
        let outcome = pending.flow.finish(result);
        pending.settled = true;
        outcome
    }

    /// Leave the confirmation view with an empty form
    pub fn start_new(&mut self) {
        self.form = F::default();
        self.state = FlowState::Editing;
    }
}

/// Puts an abandoned submission back into `Editing`
struct Pending<'a, F: InquiryForm> {
    flow: &'a mut SubmissionFlow<F>,
    settled: bool,
}

impl<F: InquiryForm> Drop for Pending<'_, F> {
    fn drop(&mut self) {
        if !self.settled && self.flow.state == FlowState::Submitting {
            let category = F::CATEGORY;
            tracing::debug!(category = %category, "Submission abandoned before the gateway answered");
            self.flow.state = FlowState::Editing;
        }
    }
}
