use std::io::stdout;

use chrono::Local;
use crossterm::{
    cursor,
    terminal::{self, ClearType},
    ExecutableCommand,
};

use crate::cli::io;
use crate::cli::output;
use crate::cli::screens::{self, ScreenAction};
use crate::config::ConfigManager;
use crate::errors::OnboardingError;
use crate::flow::{FlowEvent, OnboardingFlow};
use crate::gateway::SubmissionGateway;
use crate::steps::StepId;

/// Runs the onboarding wizard until the application is submitted or the
/// applicant quits.
pub fn run_cli() -> Result<(), OnboardingError> {
    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    if !manager.path().exists() {
        manager.save(&config)?;
    }
    let gateway = SubmissionGateway::from_config(&config)?;

    let mut flow = OnboardingFlow::new();

    loop {
        clear_screen()?;
        output::section(format!(
            "Step {} of {}: {}",
            flow.step_number(),
            flow.step_count(),
            flow.current_step()
        ));

        let action = match flow.current_step() {
            StepId::Identity => screens::identity(flow.record())?,
            StepId::Profile => screens::profile(flow.record(), Local::now().date_naive())?,
            StepId::Investment => screens::investment(flow.record())?,
            StepId::Banking => screens::banking(flow.record())?,
            StepId::Documents => screens::documents(flow.record())?,
        };

        match action {
            ScreenAction::Commit(patch) => {
                if flow.advance(patch) == FlowEvent::Completed
                    && submit_with_retry(&mut flow, &gateway)?
                {
                    render_success();
                    if io::confirm_action("Start another application?", false)? {
                        flow.reset();
                    } else {
                        break;
                    }
                }
            }
            ScreenAction::Back => {
                if flow.go_back() == FlowEvent::Ignored {
                    io::print_warning("Already at the first step.");
                    pause()?;
                }
            }
            ScreenAction::Jump => jump(&mut flow)?,
            ScreenAction::Quit => {
                if io::confirm_action("Quit and discard this application?", false)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn jump(flow: &mut OnboardingFlow) -> Result<(), OnboardingError> {
    let targets: Vec<StepId> = flow.completed_steps().to_vec();
    if targets.is_empty() {
        io::print_warning("No completed steps to revisit.");
        return pause();
    }
    let labels: Vec<&str> = targets.iter().map(|step| step.title()).collect();
    let index = io::select_label("Jump to", &labels, 0)?;
    flow.jump_to(targets[index]);
    Ok(())
}

/// A failed submission keeps the application intact, so the applicant can
/// retry as often as they like or walk back through the steps.
fn submit_with_retry(
    flow: &mut OnboardingFlow,
    gateway: &SubmissionGateway,
) -> Result<bool, OnboardingError> {
    loop {
        io::print_info("Submitting your application...");
        match flow.submit(gateway) {
            Ok(receipt) => {
                io::print_success(format!("Application received (status {}).", receipt.status));
                return Ok(true);
            }
            Err(err) => {
                io::print_error(&err);
                if !io::confirm_action("Try again?", true)? {
                    return Ok(false);
                }
            }
        }
    }
}

fn render_success() {
    output::separator();
    output::success("Application Submitted");
    output::info("Our team will review your details and reach out shortly.");
    output::separator();
}

fn pause() -> Result<(), OnboardingError> {
    let _ = io::prompt_text("Press Enter to continue", None)?;
    Ok(())
}

fn clear_screen() -> Result<(), OnboardingError> {
    let mut out = stdout();
    out.execute(terminal::Clear(ClearType::All))?;
    out.execute(cursor::MoveTo(0, 0))?;
    Ok(())
}
