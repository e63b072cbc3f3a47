use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn init_logging(debug_mode: bool) {
    let default_level = if debug_mode {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let lookup = |name: &str| std::env::var(name).ok();

    let result = match greet::config::load_config(lookup) {
        Ok(config) => {
            init_logging(config.debug_mode);
            greet::run::run_from_env(&config, lookup).await
        }
        Err(err) => {
            init_logging(false);
            Err(err)
        }
    };

    match result {
        Ok(outcome) => {
            if let Err(e) = greet::output::println(&outcome.message(), &mut None) {
                eprintln!("{e}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let Err(e) = greet::output::error(&format!("{err:#}"), &mut None) {
                eprintln!("{e}");
            }
            ExitCode::FAILURE
        }
    }
}
