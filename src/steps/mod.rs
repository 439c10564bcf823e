//! Step models. Each step owns a draft of its fields, a fixed-shape error
//! bag, and a completion gate; committing a step emits a [`RecordPatch`]
//! for the flow to merge. Steps never touch the record directly.

pub mod banking;
pub mod documents;
pub mod identity;
pub mod investment;
pub mod profile;

pub use banking::BankingStep;
pub use documents::DocumentsStep;
pub use identity::IdentityStep;
pub use investment::InvestmentStep;
pub use profile::ProfileStep;

use std::fmt;

use crate::domain::record::AccountType;

/// Identifies a wizard step independent of where it sits in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepId {
    Identity,
    Profile,
    Investment,
    Banking,
    Documents,
}

impl StepId {
    pub fn title(self) -> &'static str {
        match self {
            StepId::Identity => "Account",
            StepId::Profile => "Account Details",
            StepId::Investment => "Investment Details",
            StepId::Banking => "Banking Details",
            StepId::Documents => "Upload Documents",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

const INDIVIDUAL_SEQUENCE: [StepId; 5] = [
    StepId::Identity,
    StepId::Profile,
    StepId::Investment,
    StepId::Banking,
    StepId::Documents,
];

const BUSINESS_SEQUENCE: [StepId; 3] = [StepId::Identity, StepId::Profile, StepId::Documents];

/// Step order for an applicant kind. Business applicants skip the
/// investment and banking steps.
pub fn sequence_for(kind: AccountType) -> &'static [StepId] {
    match kind {
        AccountType::Individual => &INDIVIDUAL_SEQUENCE,
        AccountType::Business => &BUSINESS_SEQUENCE,
    }
}
