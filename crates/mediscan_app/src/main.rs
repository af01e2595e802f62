mod platform;

fn main() {
    platform::logging::initialize(platform::logging::LogDestination::from_env());
    if let Err(err) = platform::app::run_app() {
        eprintln!("mediscan failed to start: {err}");
        std::process::exit(1);
    }
}
