use crate::domain::catalog::Bank;
use crate::domain::record::{OnboardingRecord, RecordPatch};
use crate::validation::{self, MIN_ACCOUNT_NUMBER_DIGITS};

pub const BANK_ERROR: &str = "Please select a bank name";
pub const ACCOUNT_NUMBER_ERROR: &str = "Please enter a valid account number";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BankingErrors {
    pub bank: bool,
    pub account_number: bool,
}

impl BankingErrors {
    pub fn any(&self) -> bool {
        self.bank || self.account_number
    }
}

/// Fourth step (individual flow only): settlement bank and account number.
#[derive(Debug, Clone)]
pub struct BankingStep {
    bank: Option<Bank>,
    account_number: String,
    errors: BankingErrors,
}

impl BankingStep {
    pub fn new() -> Self {
        Self::from_record(&OnboardingRecord::default())
    }

    pub fn from_record(record: &OnboardingRecord) -> Self {
        Self {
            bank: record.bank,
            account_number: record.account_number.clone().unwrap_or_default(),
            errors: BankingErrors::default(),
        }
    }

    pub fn bank(&self) -> Option<Bank> {
        self.bank
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn errors(&self) -> BankingErrors {
        self.errors
    }

    pub fn set_bank(&mut self, bank: Bank) {
        self.bank = Some(bank);
        self.errors.bank = false;
    }

    /// Digits only; the field is capped at ten characters the same way the
    /// input widget caps typing.
    pub fn set_account_number(&mut self, value: &str) {
        if !validation::is_digits_only(value) {
            return;
        }
        self.account_number = value.chars().take(MIN_ACCOUNT_NUMBER_DIGITS).collect();
        self.errors.account_number = false;
    }

    pub fn can_advance(&self) -> bool {
        !self.errors.any() && self.bank.is_some() && !self.account_number.is_empty()
    }

    pub fn validate(&mut self) -> bool {
        self.errors = BankingErrors {
            bank: self.bank.is_none(),
            account_number: !validation::is_valid_account_number(&self.account_number),
        };
        !self.errors.any()
    }

    pub fn submit(&mut self) -> Option<RecordPatch> {
        if !self.validate() {
            return None;
        }
        Some(RecordPatch {
            bank: self.bank,
            account_number: Some(self.account_number.clone()),
            ..Default::default()
        })
    }

    pub fn messages(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.errors.bank {
            out.push(BANK_ERROR);
        }
        if self.errors.account_number {
            out.push(ACCOUNT_NUMBER_ERROR);
        }
        out
    }
}

impl Default for BankingStep {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_number_is_capped_at_ten_digits() {
        let mut step = BankingStep::new();
        step.set_account_number("01234567890123");
        assert_eq!(step.account_number(), "0123456789");
    }

    #[test]
    fn non_digit_account_numbers_are_dropped() {
        let mut step = BankingStep::new();
        step.set_account_number("0123456789");
        step.set_account_number("01234a6789");
        assert_eq!(step.account_number(), "0123456789");
    }

    #[test]
    fn short_account_number_blocks_submission() {
        let mut step = BankingStep::new();
        step.set_bank(Bank::Kuda);
        step.set_account_number("012345");

        assert!(step.submit().is_none());
        assert!(step.errors().account_number);
        assert_eq!(step.messages(), vec![ACCOUNT_NUMBER_ERROR]);
    }

    #[test]
    fn missing_bank_blocks_submission() {
        let mut step = BankingStep::new();
        step.set_account_number("0123456789");

        assert!(step.submit().is_none());
        assert!(step.errors().bank);
    }

    #[test]
    fn complete_step_commits_bank_and_number() {
        let mut step = BankingStep::new();
        step.set_bank(Bank::AccessBank);
        step.set_account_number("0123456789");

        let patch = step.submit().expect("valid step should commit");
        assert_eq!(patch.bank, Some(Bank::AccessBank));
        assert_eq!(patch.account_number.as_deref(), Some("0123456789"));
    }
}
