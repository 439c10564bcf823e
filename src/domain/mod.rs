pub mod catalog;
pub mod record;

pub use catalog::{Bank, InvestmentDuration, InvestmentType, PortfolioType, RiskAppetite};
pub use record::{AccountType, OnboardingRecord, RecordPatch};
