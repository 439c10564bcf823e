//! Wizard flow controller. Owns the record, the step sequence, and the
//! cursor; step models commit patches through [`OnboardingFlow::advance`]
//! and never touch the record directly.

use tracing::{debug, info};

use crate::domain::record::{OnboardingRecord, RecordPatch};
use crate::gateway::{RecordSubmitter, SubmissionError, SubmissionReceipt};
use crate::steps::{sequence_for, StepId};

/// Where the wizard stands as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    InProgress,
    ReadyToSubmit,
    Submitted,
}

/// Outcome of a navigation request. `Ignored` means the request broke a
/// flow rule and nothing changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    Moved { to: StepId },
    Completed,
    Ignored,
}

pub struct OnboardingFlow {
    record: OnboardingRecord,
    sequence: &'static [StepId],
    position: usize,
    phase: FlowPhase,
}

impl OnboardingFlow {
    /// Fresh wizard at the identity step, on the individual sequence until
    /// the applicant says otherwise.
    pub fn new() -> Self {
        Self {
            record: OnboardingRecord::default(),
            sequence: sequence_for(Default::default()),
            position: 0,
            phase: FlowPhase::InProgress,
        }
    }

    pub fn record(&self) -> &OnboardingRecord {
        &self.record
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn current_step(&self) -> StepId {
        self.sequence[self.position]
    }

    /// One-based position for "Step N of M" headers.
    pub fn step_number(&self) -> usize {
        self.position + 1
    }

    pub fn step_count(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_last_step(&self) -> bool {
        self.position + 1 == self.sequence.len()
    }

    /// Steps already completed, in order. These are the legal jump targets.
    pub fn completed_steps(&self) -> &[StepId] {
        &self.sequence[..self.position]
    }

    /// Commits a step: merges its patch, then moves the cursor forward.
    /// Completing the identity step recomputes the sequence, since the
    /// account type decides which steps follow. Completing the last step
    /// readies the flow for submission instead of moving.
    pub fn advance(&mut self, patch: RecordPatch) -> FlowEvent {
        if self.phase == FlowPhase::Submitted {
            return FlowEvent::Ignored;
        }

        self.record.merge(patch);
        if self.position == 0 {
            if let Some(kind) = self.record.account_type {
                self.sequence = sequence_for(kind);
            }
        }

        if self.is_last_step() {
            self.phase = FlowPhase::ReadyToSubmit;
            debug!(step = %self.current_step(), "final step completed");
            return FlowEvent::Completed;
        }

        self.position += 1;
        self.phase = FlowPhase::InProgress;
        debug!(step = %self.current_step(), "advanced");
        FlowEvent::Moved {
            to: self.current_step(),
        }
    }

    /// Steps back one position. Recorded data stays put, so the step being
    /// re-entered can prefill from it.
    pub fn go_back(&mut self) -> FlowEvent {
        if self.phase == FlowPhase::Submitted || self.position == 0 {
            return FlowEvent::Ignored;
        }
        self.position -= 1;
        self.phase = FlowPhase::InProgress;
        debug!(step = %self.current_step(), "went back");
        FlowEvent::Moved {
            to: self.current_step(),
        }
    }

    /// Jumps straight to an already-completed step. Forward jumps and
    /// unknown steps are ignored.
    pub fn jump_to(&mut self, step: StepId) -> FlowEvent {
        if self.phase == FlowPhase::Submitted {
            return FlowEvent::Ignored;
        }
        match self.sequence.iter().position(|&candidate| candidate == step) {
            Some(index) if index < self.position => {
                self.position = index;
                self.phase = FlowPhase::InProgress;
                debug!(step = %self.current_step(), "jumped back");
                FlowEvent::Moved {
                    to: self.current_step(),
                }
            }
            _ => FlowEvent::Ignored,
        }
    }

    /// Sends the record through the gateway. A failure leaves the record
    /// and the phase untouched so the applicant can retry or go back.
    pub fn submit(
        &mut self,
        submitter: &dyn RecordSubmitter,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        if self.phase != FlowPhase::ReadyToSubmit {
            return Err(SubmissionError::NotReady);
        }
        let receipt = submitter.submit(&self.record)?;
        self.phase = FlowPhase::Submitted;
        info!(status = receipt.status, "application submitted");
        Ok(receipt)
    }

    /// Discards everything and starts a fresh application.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for OnboardingFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::AccountType;

    struct StubSubmitter(Result<SubmissionReceipt, SubmissionError>);

    impl RecordSubmitter for StubSubmitter {
        fn submit(&self, _record: &OnboardingRecord) -> Result<SubmissionReceipt, SubmissionError> {
            self.0.clone()
        }
    }

    fn business_identity() -> RecordPatch {
        RecordPatch {
            account_type: Some(AccountType::Business),
            business_name: Some("Acme Holdings".into()),
            business_email: Some("ops@acme.example".into()),
            password: Some("Str0ng!pass".into()),
            ..Default::default()
        }
    }

    #[test]
    fn new_flow_starts_at_the_identity_step() {
        let flow = OnboardingFlow::new();
        assert_eq!(flow.current_step(), StepId::Identity);
        assert_eq!(flow.step_count(), 5);
        assert_eq!(flow.phase(), FlowPhase::InProgress);
    }

    #[test]
    fn business_identity_commit_shortens_the_sequence() {
        let mut flow = OnboardingFlow::new();
        let event = flow.advance(business_identity());

        assert_eq!(event, FlowEvent::Moved { to: StepId::Profile });
        assert_eq!(flow.step_count(), 3);
    }

    #[test]
    fn completing_the_last_step_readies_submission() {
        let mut flow = OnboardingFlow::new();
        flow.advance(business_identity());
        flow.advance(RecordPatch::default());
        let event = flow.advance(RecordPatch::default());

        assert_eq!(event, FlowEvent::Completed);
        assert_eq!(flow.phase(), FlowPhase::ReadyToSubmit);
        assert_eq!(flow.current_step(), StepId::Documents);
    }

    #[test]
    fn back_from_the_first_step_is_ignored() {
        let mut flow = OnboardingFlow::new();
        assert_eq!(flow.go_back(), FlowEvent::Ignored);
        assert_eq!(flow.current_step(), StepId::Identity);
    }

    #[test]
    fn only_completed_steps_are_jump_targets() {
        let mut flow = OnboardingFlow::new();
        flow.advance(RecordPatch::default());
        flow.advance(RecordPatch::default());

        assert_eq!(flow.jump_to(StepId::Banking), FlowEvent::Ignored);
        assert_eq!(
            flow.jump_to(StepId::Identity),
            FlowEvent::Moved { to: StepId::Identity }
        );
        assert_eq!(flow.step_number(), 1);
    }

    #[test]
    fn going_back_preserves_recorded_data() {
        let mut flow = OnboardingFlow::new();
        flow.advance(RecordPatch::default());
        flow.advance(RecordPatch {
            address: Some("12 Marina Road".into()),
            ..Default::default()
        });

        flow.go_back();
        assert_eq!(flow.record().address.as_deref(), Some("12 Marina Road"));
    }

    #[test]
    fn submit_before_completion_is_rejected() {
        let mut flow = OnboardingFlow::new();
        let stub = StubSubmitter(Ok(SubmissionReceipt {
            status: 200,
            body: serde_json::json!({"ok": true}),
        }));

        assert_eq!(flow.submit(&stub), Err(SubmissionError::NotReady));
    }

    #[test]
    fn failed_submission_keeps_the_flow_ready_for_retry() {
        let mut flow = OnboardingFlow::new();
        flow.advance(business_identity());
        flow.advance(RecordPatch {
            address: Some("12 Marina Road".into()),
            ..Default::default()
        });
        flow.advance(RecordPatch::default());

        let failing = StubSubmitter(Err(SubmissionError::Rejected { status: 500 }));
        assert_eq!(
            flow.submit(&failing),
            Err(SubmissionError::Rejected { status: 500 })
        );
        assert_eq!(flow.phase(), FlowPhase::ReadyToSubmit);
        assert_eq!(flow.record().address.as_deref(), Some("12 Marina Road"));

        let succeeding = StubSubmitter(Ok(SubmissionReceipt {
            status: 200,
            body: serde_json::json!({"ok": true}),
        }));
        assert!(flow.submit(&succeeding).is_ok());
        assert_eq!(flow.phase(), FlowPhase::Submitted);
    }

    #[test]
    fn reset_starts_a_fresh_application() {
        let mut flow = OnboardingFlow::new();
        flow.advance(business_identity());
        flow.reset();

        assert_eq!(flow.current_step(), StepId::Identity);
        assert_eq!(flow.step_count(), 5);
        assert_eq!(flow.record(), &OnboardingRecord::default());
    }
}
