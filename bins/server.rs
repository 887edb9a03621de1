use std::process::ExitCode;

use configs::AppConfig;
use tracing::{error, info};

const SERVICE: &str = "product-catalog";

fn main() -> ExitCode {
    // .env must be loaded before RUST_LOG / LOG_FORMAT are read
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let pid = std::process::id();
    std::panic::set_hook(Box::new(move |info| {
        error!(service = SERVICE, event = "panic", pid, message = %info, "unhandled panic");
    }));

    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = SERVICE, event = "config_invalid", error = %e, "configuration rejected");
            return ExitCode::FAILURE;
        }
    };

    match serve(cfg, pid) {
        Ok(()) => {
            info!(service = SERVICE, event = "stop", pid, "product service stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = SERVICE, event = "run_failed", error = %e, "product service failed");
            ExitCode::FAILURE
        }
    }
}

/// Build the runtime sized from the config and serve until Ctrl+C.
fn serve(cfg: AppConfig, pid: u32) -> anyhow::Result<()> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(threads) = cfg.server.worker_threads {
        builder.worker_threads(threads);
    }
    let rt = builder.build()?;

    info!(
        service = SERVICE,
        event = "start",
        pid,
        version = env!("CARGO_PKG_VERSION"),
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "product service starting"
    );

    rt.block_on(server::startup::run_with_config(cfg, async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!(service = SERVICE, event = "shutdown_signal", "received Ctrl+C, draining connections");
        }
    }))
}
