use crate::domain::catalog::{InvestmentDuration, InvestmentType};
use crate::domain::record::{OnboardingRecord, RecordPatch};
use crate::validation;

pub const AMOUNT_ERROR: &str = "Please enter a valid investment amount";
pub const TYPE_ERROR: &str = "Please select an investment type";
pub const DURATION_ERROR: &str = "Please select an investment duration";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvestmentErrors {
    pub amount: bool,
    pub investment_type: bool,
    pub duration: bool,
}

impl InvestmentErrors {
    pub fn any(&self) -> bool {
        self.amount || self.investment_type || self.duration
    }
}

/// Third step (individual flow only): how much, how often, for how long.
#[derive(Debug, Clone)]
pub struct InvestmentStep {
    amount: String,
    investment_type: Option<InvestmentType>,
    duration: Option<InvestmentDuration>,
    errors: InvestmentErrors,
}

impl InvestmentStep {
    pub fn new() -> Self {
        Self::from_record(&OnboardingRecord::default())
    }

    pub fn from_record(record: &OnboardingRecord) -> Self {
        Self {
            amount: record.investment_amount.clone().unwrap_or_default(),
            investment_type: record.investment_type,
            duration: record.investment_duration,
            errors: InvestmentErrors::default(),
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn investment_type(&self) -> Option<InvestmentType> {
        self.investment_type
    }

    pub fn duration(&self) -> Option<InvestmentDuration> {
        self.duration
    }

    pub fn errors(&self) -> InvestmentErrors {
        self.errors
    }

    /// Amount field accepts digits only; any other change is dropped
    /// without raising an error.
    pub fn set_amount(&mut self, value: &str) {
        if validation::is_digits_only(value) {
            self.amount = value.to_string();
            self.errors.amount = false;
        }
    }

    pub fn set_investment_type(&mut self, investment_type: InvestmentType) {
        self.investment_type = Some(investment_type);
        self.errors.investment_type = false;
    }

    pub fn set_duration(&mut self, duration: InvestmentDuration) {
        self.duration = Some(duration);
        self.errors.duration = false;
    }

    pub fn can_advance(&self) -> bool {
        !self.errors.any()
            && !self.amount.is_empty()
            && self.investment_type.is_some()
            && self.duration.is_some()
    }

    pub fn validate(&mut self) -> bool {
        self.errors = InvestmentErrors {
            amount: self.amount.is_empty(),
            investment_type: self.investment_type.is_none(),
            duration: self.duration.is_none(),
        };
        !self.errors.any()
    }

    pub fn submit(&mut self) -> Option<RecordPatch> {
        if !self.validate() {
            return None;
        }
        Some(RecordPatch {
            investment_amount: Some(self.amount.clone()),
            investment_type: self.investment_type,
            investment_duration: self.duration,
            ..Default::default()
        })
    }

    pub fn messages(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.errors.amount {
            out.push(AMOUNT_ERROR);
        }
        if self.errors.investment_type {
            out.push(TYPE_ERROR);
        }
        if self.errors.duration {
            out.push(DURATION_ERROR);
        }
        out
    }
}

impl Default for InvestmentStep {
    fn default() -> Self {
        Self::new()
    }
}
