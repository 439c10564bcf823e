use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Password, Select};
use once_cell::sync::Lazy;

use crate::cli::output;
use crate::errors::OnboardingError;

static THEME: Lazy<ColorfulTheme> = Lazy::new(ColorfulTheme::default);

pub fn theme() -> &'static ColorfulTheme {
    &THEME
}

/// Print an informational message via the standard CLI output helpers.
pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

/// Print a warning message via the standard CLI output helpers.
pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

/// Print an error message via the standard CLI output helpers.
pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

/// Print a success message via the standard CLI output helpers.
pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(prompt: &str, default: bool) -> Result<bool, OnboardingError> {
    Ok(Confirm::with_theme(theme())
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Prompt for free-form text, seeded with the current value when one exists.
pub fn prompt_text(prompt: &str, initial: Option<&str>) -> Result<String, OnboardingError> {
    let mut input = Input::<String>::with_theme(theme())
        .with_prompt(prompt)
        .allow_empty(true);
    if let Some(existing) = initial {
        if !existing.is_empty() {
            input = input.with_initial_text(existing);
        }
    }
    Ok(input.interact_text()?)
}

/// Prompt for a password without echoing it.
pub fn prompt_password(prompt: &str) -> Result<String, OnboardingError> {
    Ok(Password::with_theme(theme())
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()?)
}

/// Pick one label from a fixed list; returns the chosen index.
pub fn select_label(prompt: &str, labels: &[&str], default: usize) -> Result<usize, OnboardingError> {
    Ok(Select::with_theme(theme())
        .with_prompt(prompt)
        .items(labels)
        .default(default)
        .interact()?)
}

/// Pick any number of labels; returns the chosen indices.
pub fn multi_select_labels(
    prompt: &str,
    labels: &[&str],
    checked: &[bool],
) -> Result<Vec<usize>, OnboardingError> {
    let items: Vec<(&str, bool)> = labels
        .iter()
        .copied()
        .zip(checked.iter().copied())
        .collect();
    Ok(MultiSelect::with_theme(theme())
        .with_prompt(prompt)
        .items_checked(&items)
        .interact()?)
}
