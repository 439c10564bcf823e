use std::fmt;

use serde::{Deserialize, Serialize};

/// Enumerates the risk appetites offered during profiling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskAppetite {
    #[serde(rename = "high")]
    High,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "low")]
    Low,
}

impl RiskAppetite {
    pub const ALL: [RiskAppetite; 3] = [RiskAppetite::High, RiskAppetite::Medium, RiskAppetite::Low];

    pub fn label(self) -> &'static str {
        match self {
            RiskAppetite::High => "High",
            RiskAppetite::Medium => "Medium",
            RiskAppetite::Low => "Low",
        }
    }
}

impl fmt::Display for RiskAppetite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Enumerates the portfolio products an applicant can opt into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PortfolioType {
    #[serde(rename = "Bitcoin Trust Fund")]
    BitcoinTrust,
    #[serde(rename = "Varied Asset Fund")]
    VariedAsset,
    #[serde(rename = "Specialized AI Fund")]
    SpecializedAi,
}

impl PortfolioType {
    pub const ALL: [PortfolioType; 3] = [
        PortfolioType::BitcoinTrust,
        PortfolioType::VariedAsset,
        PortfolioType::SpecializedAi,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PortfolioType::BitcoinTrust => "Bitcoin Trust Fund",
            PortfolioType::VariedAsset => "Varied Asset Fund",
            PortfolioType::SpecializedAi => "Specialized AI Fund",
        }
    }
}

impl fmt::Display for PortfolioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Enumerates the contribution schedules for an investment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InvestmentType {
    #[serde(rename = "One Time")]
    OneTime,
    #[serde(rename = "Recurring")]
    Recurring,
}

impl InvestmentType {
    pub const ALL: [InvestmentType; 2] = [InvestmentType::OneTime, InvestmentType::Recurring];

    pub fn label(self) -> &'static str {
        match self {
            InvestmentType::OneTime => "One Time",
            InvestmentType::Recurring => "Recurring",
        }
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Enumerates the lock-in durations for an investment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InvestmentDuration {
    #[serde(rename = "3 Months")]
    ThreeMonths,
    #[serde(rename = "6 Months")]
    SixMonths,
    // The upstream catalog spells this one in lowercase.
    #[serde(rename = "1 year")]
    OneYear,
}

impl InvestmentDuration {
    pub const ALL: [InvestmentDuration; 3] = [
        InvestmentDuration::ThreeMonths,
        InvestmentDuration::SixMonths,
        InvestmentDuration::OneYear,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InvestmentDuration::ThreeMonths => "3 Months",
            InvestmentDuration::SixMonths => "6 Months",
            InvestmentDuration::OneYear => "1 year",
        }
    }
}

impl fmt::Display for InvestmentDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Enumerates the settlement banks supported for payouts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Bank {
    #[serde(rename = "Access Bank")]
    AccessBank,
    #[serde(rename = "First Bank")]
    FirstBank,
    #[serde(rename = "Kuda")]
    Kuda,
    #[serde(rename = "Opay")]
    Opay,
}

impl Bank {
    pub const ALL: [Bank; 4] = [Bank::AccessBank, Bank::FirstBank, Bank::Kuda, Bank::Opay];

    pub fn label(self) -> &'static str {
        match self {
            Bank::AccessBank => "Access Bank",
            Bank::FirstBank => "First Bank",
            Bank::Kuda => "Kuda",
            Bank::Opay => "Opay",
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
