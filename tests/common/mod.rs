#![allow(dead_code)]

use chrono::NaiveDate;
use onboarding_core::domain::catalog::{
    Bank, InvestmentDuration, InvestmentType, PortfolioType, RiskAppetite,
};
use onboarding_core::domain::record::{AccountType, RecordPatch};
use onboarding_core::flow::OnboardingFlow;
use onboarding_core::upload::FileBlob;

pub fn jpeg(name: &str, size: u64) -> FileBlob {
    FileBlob::new(name, size, "image/jpeg")
}

pub fn selfie_blob() -> FileBlob {
    FileBlob::with_bytes("selfie.png", "image/png", vec![0x89, 0x50, 0x4E, 0x47])
}

pub fn individual_identity() -> RecordPatch {
    RecordPatch {
        account_type: Some(AccountType::Individual),
        full_name: Some("Jane Doe".into()),
        email: Some("jane@example.com".into()),
        password: Some("Str0ng!pass".into()),
        ..Default::default()
    }
}

pub fn business_identity() -> RecordPatch {
    RecordPatch {
        account_type: Some(AccountType::Business),
        business_name: Some("Acme Holdings".into()),
        business_email: Some("ops@acme.example".into()),
        password: Some("Str0ng!pass".into()),
        ..Default::default()
    }
}

pub fn profile_patch() -> RecordPatch {
    RecordPatch {
        date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 2),
        address: Some("12 Marina Road, Lagos".into()),
        risk_appetite: Some(RiskAppetite::High),
        portfolio_types: Some(vec![PortfolioType::BitcoinTrust, PortfolioType::VariedAsset]),
        ..Default::default()
    }
}

pub fn investment_patch() -> RecordPatch {
    RecordPatch {
        investment_amount: Some("250000".into()),
        investment_type: Some(InvestmentType::OneTime),
        investment_duration: Some(InvestmentDuration::SixMonths),
        ..Default::default()
    }
}

pub fn banking_patch() -> RecordPatch {
    RecordPatch {
        bank: Some(Bank::Kuda),
        account_number: Some("0123456789".into()),
        ..Default::default()
    }
}

pub fn documents_patch() -> RecordPatch {
    RecordPatch {
        uploaded_files: Some(vec![
            jpeg("government-id.jpg", 120_000),
            FileBlob::new("utility-bill.pdf", 90_000, "application/pdf"),
        ]),
        selfie: Some(selfie_blob()),
        ..Default::default()
    }
}

/// An individual application walked through every step, ready to submit.
pub fn ready_individual_flow() -> OnboardingFlow {
    let mut flow = OnboardingFlow::new();
    flow.advance(individual_identity());
    flow.advance(profile_patch());
    flow.advance(investment_patch());
    flow.advance(banking_patch());
    flow.advance(documents_patch());
    flow
}
