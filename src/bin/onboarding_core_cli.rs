fn main() {
    onboarding_core::init();

    if let Err(err) = onboarding_core::cli::run_cli() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
