use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::{Bank, InvestmentDuration, InvestmentType, PortfolioType, RiskAppetite};
use crate::upload::FileBlob;

/// Kind of applicant going through onboarding. Drives the step sequence
/// and which identity pair the record carries.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountType {
    #[default]
    #[serde(rename = "Personal Account")]
    Individual,
    #[serde(rename = "Business Account")]
    Business,
}

impl AccountType {
    pub const ALL: [AccountType; 2] = [AccountType::Individual, AccountType::Business];

    pub fn label(self) -> &'static str {
        match self {
            AccountType::Individual => "Personal Account",
            AccountType::Business => "Business Account",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The single aggregate accumulated across the wizard. Steps never write
/// here directly; the flow merges the patches they emit at commit points.
///
/// Exactly one identity pair is populated at a time: `full_name`/`email`
/// for individuals, `business_name`/`business_email` for businesses.
/// Serialization mirrors the submission payload; unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "dob", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "investment", skip_serializing_if = "Option::is_none")]
    pub risk_appetite: Option<RiskAppetite>,
    #[serde(rename = "portfolioType", skip_serializing_if = "Vec::is_empty")]
    pub portfolio_types: Vec<PortfolioType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment_type: Option<InvestmentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment_duration: Option<InvestmentDuration>,
    #[serde(rename = "bankName", skip_serializing_if = "Option::is_none")]
    pub bank: Option<Bank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(rename = "files", skip_serializing_if = "Vec::is_empty")]
    pub uploaded_files: Vec<FileBlob>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selfie: Option<FileBlob>,
}

impl OnboardingRecord {
    /// Applies a step commit: every populated patch field overwrites the
    /// stored value, later writes win. The identity pair is then squared
    /// with the account type so a kind change never leaves a stale pair.
    pub fn merge(&mut self, patch: RecordPatch) {
        if let Some(kind) = patch.account_type {
            self.account_type = Some(kind);
        }
        if let Some(value) = patch.full_name {
            self.full_name = Some(value);
        }
        if let Some(value) = patch.email {
            self.email = Some(value);
        }
        if let Some(value) = patch.business_name {
            self.business_name = Some(value);
        }
        if let Some(value) = patch.business_email {
            self.business_email = Some(value);
        }
        if let Some(value) = patch.password {
            self.password = Some(value);
        }
        if let Some(value) = patch.date_of_birth {
            self.date_of_birth = Some(value);
        }
        if let Some(value) = patch.address {
            self.address = Some(value);
        }
        if let Some(value) = patch.risk_appetite {
            self.risk_appetite = Some(value);
        }
        if let Some(value) = patch.portfolio_types {
            self.portfolio_types = value;
        }
        if let Some(value) = patch.investment_amount {
            self.investment_amount = Some(value);
        }
        if let Some(value) = patch.investment_type {
            self.investment_type = Some(value);
        }
        if let Some(value) = patch.investment_duration {
            self.investment_duration = Some(value);
        }
        if let Some(value) = patch.bank {
            self.bank = Some(value);
        }
        if let Some(value) = patch.account_number {
            self.account_number = Some(value);
        }
        if let Some(value) = patch.uploaded_files {
            self.uploaded_files = value;
        }
        if let Some(value) = patch.selfie {
            self.selfie = Some(value);
        }

        match self.account_type {
            Some(AccountType::Individual) => {
                self.business_name = None;
                self.business_email = None;
            }
            Some(AccountType::Business) => {
                self.full_name = None;
                self.email = None;
            }
            None => {}
        }
    }
}

/// Value object emitted by a step commit. Only populated fields are merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub account_type: Option<AccountType>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub business_name: Option<String>,
    pub business_email: Option<String>,
    pub password: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub risk_appetite: Option<RiskAppetite>,
    pub portfolio_types: Option<Vec<PortfolioType>>,
    pub investment_amount: Option<String>,
    pub investment_type: Option<InvestmentType>,
    pub investment_duration: Option<InvestmentDuration>,
    pub bank: Option<Bank>,
    pub account_number: Option<String>,
    pub uploaded_files: Option<Vec<FileBlob>>,
    pub selfie: Option<FileBlob>,
}
