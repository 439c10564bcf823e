use chrono::NaiveDate;

use crate::domain::catalog::{PortfolioType, RiskAppetite};
use crate::domain::record::{OnboardingRecord, RecordPatch};
use crate::validation;

pub const DATE_ERROR: &str = "Please enter a valid date of birth";
pub const ADDRESS_ERROR: &str = "Address field cannot be empty";
pub const RISK_ERROR: &str = "Please select your investment appetite";
pub const PORTFOLIO_ERROR: &str = "Please choose a preferred portfolio";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileErrors {
    pub date_of_birth: bool,
    pub address: bool,
    pub risk_appetite: bool,
    pub portfolio: bool,
}

impl ProfileErrors {
    pub fn any(&self) -> bool {
        self.date_of_birth || self.address || self.risk_appetite || self.portfolio
    }
}

/// Second step: personal profile and investment appetite. The reference
/// date for the adulthood check is injected by the caller.
#[derive(Debug, Clone)]
pub struct ProfileStep {
    today: NaiveDate,
    date_of_birth: Option<NaiveDate>,
    address: String,
    risk_appetite: Option<RiskAppetite>,
    portfolio_types: Vec<PortfolioType>,
    errors: ProfileErrors,
}

impl ProfileStep {
    pub fn new(today: NaiveDate) -> Self {
        Self::from_record(&OnboardingRecord::default(), today)
    }

    pub fn from_record(record: &OnboardingRecord, today: NaiveDate) -> Self {
        Self {
            today,
            date_of_birth: record.date_of_birth,
            address: record.address.clone().unwrap_or_default(),
            risk_appetite: record.risk_appetite,
            portfolio_types: record.portfolio_types.clone(),
            errors: ProfileErrors::default(),
        }
    }

    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn risk_appetite(&self) -> Option<RiskAppetite> {
        self.risk_appetite
    }

    pub fn portfolio_types(&self) -> &[PortfolioType] {
        &self.portfolio_types
    }

    pub fn errors(&self) -> ProfileErrors {
        self.errors
    }

    pub fn set_date_of_birth(&mut self, date: NaiveDate) {
        self.date_of_birth = Some(date);
        self.errors.date_of_birth = false;
    }

    pub fn set_address(&mut self, value: &str) {
        self.address = value.to_string();
        self.errors.address = false;
    }

    pub fn set_risk_appetite(&mut self, risk: RiskAppetite) {
        self.risk_appetite = Some(risk);
        self.errors.risk_appetite = false;
    }

    /// Adds or removes one portfolio choice.
    pub fn toggle_portfolio(&mut self, portfolio: PortfolioType) {
        if let Some(position) = self.portfolio_types.iter().position(|p| *p == portfolio) {
            self.portfolio_types.remove(position);
        } else {
            self.portfolio_types.push(portfolio);
        }
        self.errors.portfolio = false;
    }

    pub fn set_portfolio_types(&mut self, portfolios: Vec<PortfolioType>) {
        self.portfolio_types = portfolios;
        self.errors.portfolio = false;
    }

    pub fn can_advance(&self) -> bool {
        !self.errors.any()
            && self.date_of_birth.is_some()
            && !validation::is_blank(&self.address)
            && self.risk_appetite.is_some()
            && !self.portfolio_types.is_empty()
    }

    pub fn validate(&mut self) -> bool {
        self.errors = ProfileErrors {
            date_of_birth: !matches!(
                self.date_of_birth,
                Some(dob) if validation::is_adult(dob, self.today)
            ),
            address: validation::is_blank(&self.address),
            risk_appetite: self.risk_appetite.is_none(),
            portfolio: self.portfolio_types.is_empty(),
        };
        !self.errors.any()
    }

    pub fn submit(&mut self) -> Option<RecordPatch> {
        if !self.validate() {
            return None;
        }
        Some(RecordPatch {
            date_of_birth: self.date_of_birth,
            address: Some(self.address.clone()),
            risk_appetite: self.risk_appetite,
            portfolio_types: Some(self.portfolio_types.clone()),
            ..Default::default()
        })
    }

    pub fn messages(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.errors.date_of_birth {
            out.push(DATE_ERROR);
        }
        if self.errors.address {
            out.push(ADDRESS_ERROR);
        }
        if self.errors.risk_appetite {
            out.push(RISK_ERROR);
        }
        if self.errors.portfolio {
            out.push(PORTFOLIO_ERROR);
        }
        out
    }
}
