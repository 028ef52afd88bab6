mod app_state;
mod cli;
mod favicon;
mod headless;
mod startup;

use std::process::ExitCode;

use harbor_config::DataPaths;
use harbor_profile::ProfileManager;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

const DEFAULT_LOG_DIRECTIVE: &str = "harbor=info";

fn init_logging(level: Option<&str>) {
    let directive = level
        .unwrap_or(DEFAULT_LOG_DIRECTIVE)
        .parse::<Directive>()
        .or_else(|_| DEFAULT_LOG_DIRECTIVE.parse::<Directive>());
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = directive {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> ExitCode {
    let args = cli::parse();
    init_logging(args.log_level.as_deref());

    tracing::info!("Harbor v{} starting...", env!("CARGO_PKG_VERSION"));

    let paths = match &args.data_dir {
        Some(dir) => DataPaths::new(dir),
        None => match DataPaths::platform_default() {
            Ok(paths) => paths,
            Err(e) => {
                tracing::error!("No data directory: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    if let Err(e) = std::fs::create_dir_all(paths.root()) {
        tracing::warn!("Failed to create {}: {e}", paths.root().display());
    }
    tracing::info!(data_dir = %paths.root().display(), "Using data directory");

    let mut profiles = ProfileManager::new(paths);
    profiles.loads();
    let profile = match startup::startup_profile(&mut profiles, args.profile.as_deref()) {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Cannot choose a profile: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(profile = %profile, incognito = args.incognito, "Profile selected");

    if args.headless {
        return match headless::run(profiles, &profile, args.incognito, args.urls) {
            Ok(windows) => match serde_json::to_string_pretty(&windows) {
                Ok(json) => {
                    println!("{json}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    tracing::error!("Failed to encode summary: {e}");
                    ExitCode::FAILURE
                }
            },
            Err(e) => {
                tracing::error!("Headless run failed: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            return ExitCode::FAILURE;
        }
    };
    let options = app_state::AppOptions {
        profile,
        incognito: args.incognito,
        urls: args.urls,
        assets_dir: args.assets_dir,
    };
    let mut app = app_state::HarborApp::new(options, profiles);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
        return ExitCode::FAILURE;
    }
    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
