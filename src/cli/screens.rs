//! One interactive screen per wizard step. Screens own a step model for the
//! duration of a visit, prefill it from the record, and hand the shell a
//! commit patch or a navigation request.

use std::path::Path;

use chrono::NaiveDate;

use crate::camera::{FileCamera, SelfieSession};
use crate::cli::io;
use crate::cli::output;
use crate::domain::catalog::{
    Bank, InvestmentDuration, InvestmentType, PortfolioType, RiskAppetite,
};
use crate::domain::record::{AccountType, OnboardingRecord, RecordPatch};
use crate::errors::OnboardingError;
use crate::steps::{BankingStep, DocumentsStep, IdentityStep, InvestmentStep, ProfileStep};
use crate::upload::{FileBlob, UploadedDocument};
use crate::validation::PasswordChecks;

const PROCEED: &str = "Proceed";
const TAKE_SELFIE: &str = "Proceed to Take Selfie";
const ADD_DOCUMENT: &str = "Add a document";
const REMOVE_DOCUMENT: &str = "Remove a document";
const FIX_ENTRIES: &str = "Fix entries";
const GO_BACK: &str = "Go back";
const JUMP: &str = "Jump to a completed step";
const QUIT: &str = "Quit";

/// What the applicant chose to do with the step they were on.
pub enum ScreenAction {
    Commit(RecordPatch),
    Back,
    Jump,
    Quit,
}

enum Nav {
    Primary,
    Back,
    Jump,
    Quit,
}

fn nav(primary: &str) -> Result<Nav, OnboardingError> {
    let labels = [primary, GO_BACK, JUMP, QUIT];
    Ok(match io::select_label("Next", &labels, 0)? {
        0 => Nav::Primary,
        1 => Nav::Back,
        2 => Nav::Jump,
        _ => Nav::Quit,
    })
}

/// Runs the shared tail of a field screen: on a clean commit offer to
/// proceed, otherwise show the validation messages and offer to fix.
/// `None` means stay on the screen for another pass.
fn conclude(
    outcome: Option<RecordPatch>,
    messages: Vec<&'static str>,
) -> Result<Option<ScreenAction>, OnboardingError> {
    match outcome {
        Some(patch) => Ok(Some(match nav(PROCEED)? {
            Nav::Primary => ScreenAction::Commit(patch),
            Nav::Back => ScreenAction::Back,
            Nav::Jump => ScreenAction::Jump,
            Nav::Quit => ScreenAction::Quit,
        })),
        None => {
            for message in &messages {
                output::error(message);
            }
            Ok(match nav(FIX_ENTRIES)? {
                Nav::Primary => None,
                Nav::Back => Some(ScreenAction::Back),
                Nav::Jump => Some(ScreenAction::Jump),
                Nav::Quit => Some(ScreenAction::Quit),
            })
        }
    }
}

pub fn identity(record: &OnboardingRecord) -> Result<ScreenAction, OnboardingError> {
    let mut step = IdentityStep::from_record(record);
    loop {
        let kind_labels: Vec<&str> = AccountType::ALL.iter().map(|kind| kind.label()).collect();
        let kind_default = AccountType::ALL
            .iter()
            .position(|kind| *kind == step.kind())
            .unwrap_or(0);
        let kind_index = io::select_label("Account type", &kind_labels, kind_default)?;
        step.set_kind(AccountType::ALL[kind_index]);

        let (name_label, email_label) = match step.kind() {
            AccountType::Individual => ("Full Name", "Email Address"),
            AccountType::Business => ("Business Name", "Business Email"),
        };
        let name = io::prompt_text(name_label, Some(step.name()))?;
        step.set_name(&name);
        let email = io::prompt_text(email_label, Some(step.email()))?;
        step.set_email(&email);

        let password = io::prompt_password("Password")?;
        if !password.is_empty() {
            step.set_password(&password);
            render_password_checks(&step.password_checks());
            let confirm = io::prompt_password("Confirm Password")?;
            step.set_confirm_password(&confirm);
        }

        if let Some(action) = conclude(step.submit(), step.messages())? {
            return Ok(action);
        }
    }
}

pub fn profile(record: &OnboardingRecord, today: NaiveDate) -> Result<ScreenAction, OnboardingError> {
    let mut step = ProfileStep::from_record(record, today);
    loop {
        let dob_initial = step.date_of_birth().map(|date| date.to_string());
        let dob_text = io::prompt_text("Date of Birth (YYYY-MM-DD)", dob_initial.as_deref())?;
        if let Ok(date) = NaiveDate::parse_from_str(dob_text.trim(), "%Y-%m-%d") {
            step.set_date_of_birth(date);
        }

        let address = io::prompt_text("Address", Some(step.address()))?;
        step.set_address(&address);

        let risk_labels: Vec<&str> = RiskAppetite::ALL.iter().map(|risk| risk.label()).collect();
        let risk_default = RiskAppetite::ALL
            .iter()
            .position(|risk| Some(*risk) == step.risk_appetite())
            .unwrap_or(0);
        let risk_index = io::select_label("Investment appetite", &risk_labels, risk_default)?;
        step.set_risk_appetite(RiskAppetite::ALL[risk_index]);

        let portfolio_labels: Vec<&str> = PortfolioType::ALL
            .iter()
            .map(|portfolio| portfolio.label())
            .collect();
        let checked: Vec<bool> = PortfolioType::ALL
            .iter()
            .map(|portfolio| step.portfolio_types().contains(portfolio))
            .collect();
        let picks = io::multi_select_labels("Preferred portfolio", &portfolio_labels, &checked)?;
        step.set_portfolio_types(picks.into_iter().map(|index| PortfolioType::ALL[index]).collect());

        if let Some(action) = conclude(step.submit(), step.messages())? {
            return Ok(action);
        }
    }
}

pub fn investment(record: &OnboardingRecord) -> Result<ScreenAction, OnboardingError> {
    let mut step = InvestmentStep::from_record(record);
    loop {
        let amount = io::prompt_text("Investment Amount", Some(step.amount()))?;
        step.set_amount(amount.trim());

        let type_labels: Vec<&str> = InvestmentType::ALL.iter().map(|it| it.label()).collect();
        let type_default = InvestmentType::ALL
            .iter()
            .position(|it| Some(*it) == step.investment_type())
            .unwrap_or(0);
        let type_index = io::select_label("Investment Type", &type_labels, type_default)?;
        step.set_investment_type(InvestmentType::ALL[type_index]);

        let duration_labels: Vec<&str> = InvestmentDuration::ALL
            .iter()
            .map(|duration| duration.label())
            .collect();
        let duration_default = InvestmentDuration::ALL
            .iter()
            .position(|duration| Some(*duration) == step.duration())
            .unwrap_or(0);
        let duration_index =
            io::select_label("Investment Duration", &duration_labels, duration_default)?;
        step.set_duration(InvestmentDuration::ALL[duration_index]);

        if let Some(action) = conclude(step.submit(), step.messages())? {
            return Ok(action);
        }
    }
}

pub fn banking(record: &OnboardingRecord) -> Result<ScreenAction, OnboardingError> {
    let mut step = BankingStep::from_record(record);
    loop {
        let bank_labels: Vec<&str> = Bank::ALL.iter().map(|bank| bank.label()).collect();
        let bank_default = Bank::ALL
            .iter()
            .position(|bank| Some(*bank) == step.bank())
            .unwrap_or(0);
        let bank_index = io::select_label("Bank Name", &bank_labels, bank_default)?;
        step.set_bank(Bank::ALL[bank_index]);

        let number = io::prompt_text("Account Number", Some(step.account_number()))?;
        step.set_account_number(number.trim());

        if let Some(action) = conclude(step.submit(), step.messages())? {
            return Ok(action);
        }
    }
}

pub fn documents(record: &OnboardingRecord) -> Result<ScreenAction, OnboardingError> {
    let mut step = DocumentsStep::from_record(record);
    step.start_ticker();

    loop {
        render_documents(&step);

        let snapshot = step.snapshot();
        let mut labels: Vec<&str> = vec![ADD_DOCUMENT];
        if !snapshot.is_empty() {
            labels.push(REMOVE_DOCUMENT);
        }
        labels.push(TAKE_SELFIE);
        if step.can_advance() {
            labels.push(PROCEED);
        }
        labels.extend([GO_BACK, JUMP, QUIT]);

        match labels[io::select_label("Next", &labels, 0)?] {
            ADD_DOCUMENT => add_document(&mut step)?,
            REMOVE_DOCUMENT => remove_document(&mut step, &snapshot)?,
            TAKE_SELFIE => capture_selfie(&mut step)?,
            PROCEED => {
                if let Some(patch) = step.submit() {
                    step.stop_ticker();
                    return Ok(ScreenAction::Commit(patch));
                }
            }
            GO_BACK => return Ok(ScreenAction::Back),
            JUMP => return Ok(ScreenAction::Jump),
            _ => return Ok(ScreenAction::Quit),
        }
    }
}

fn add_document(step: &mut DocumentsStep) -> Result<(), OnboardingError> {
    let path_text = io::prompt_text("Path to a document", None)?;
    let trimmed = path_text.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    let path = Path::new(trimmed);
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) => {
            io::print_error(format!("{trimmed}: {err}"));
            return Ok(());
        }
    };
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(trimmed)
        .to_string();
    let blob = FileBlob::new(name, metadata.len(), mime_for(path));

    if step.add_files(vec![blob]) == 0 {
        io::print_warning("All document slots are filled; remove one first.");
    }
    Ok(())
}

fn remove_document(
    step: &mut DocumentsStep,
    snapshot: &[UploadedDocument],
) -> Result<(), OnboardingError> {
    let names: Vec<&str> = snapshot.iter().map(|entry| entry.blob.name.as_str()).collect();
    let index = io::select_label("Remove which file?", &names, 0)?;
    step.remove(snapshot[index].id);
    Ok(())
}

fn capture_selfie(step: &mut DocumentsStep) -> Result<(), OnboardingError> {
    let path_text = io::prompt_text("Path to a selfie image", None)?;
    let trimmed = path_text.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    let mut camera = FileCamera::new(trimmed);
    let mut session = SelfieSession::new();
    match session.start(&mut camera).and_then(|_| session.capture()) {
        Ok(blob) => {
            step.set_selfie(blob);
            io::print_success("Selfie captured.");
        }
        Err(err) => io::print_error(err),
    }
    Ok(())
}

fn render_documents(step: &DocumentsStep) {
    output::info(format!("Required: {}", step.required_labels().join(", ")));
    for entry in step.snapshot() {
        match &entry.error {
            Some(error) => output::error(format!("{} ({error})", entry.blob.name)),
            None => output::info(format!("{} {}", entry.blob.name, progress_bar(entry.progress))),
        }
    }
    match step.selfie() {
        Some(_) => output::success("Selfie captured"),
        None => output::warning("Selfie pending"),
    }
    let outstanding = step.outstanding();
    if !outstanding.is_empty() {
        output::warning(format!("Outstanding: {}", outstanding.join(", ")));
    }
    output::blank_line();
}

fn render_password_checks(checks: &PasswordChecks) {
    for (label, satisfied) in checks.requirements() {
        if satisfied {
            output::success(label);
        } else {
            output::warning(label);
        }
    }
}

fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress / 10).min(10);
    format!("[{}{}] {progress:>3}%", "#".repeat(filled), "-".repeat(10 - filled))
}

fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
