use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> std::process::ExitCode {
    // load .env first so RUST_LOG / CONFIG_PATH / DLFS_DATA_DIR take effect
    dotenv().ok();

    let cfg = match console::startup::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "dlfs", event = "config_invalid", error = %e, "cannot start");
            eprintln!("dlfs: {e}");
            return std::process::ExitCode::FAILURE;
        }
    };
    console::startup::init_logging(cfg.logging.format);

    let session_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "dlfs",
            event = "panic",
            %session_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    // one session, one command at a time
    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "dlfs", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "dlfs", event = "start", %session_id, pid, version, data_dir = %cfg.storage.data_dir, "console starting");

    let code = rt.block_on(async move {
        tokio::select! {
            res = console::run(cfg) => match res {
                Ok(()) => {
                    info!(service = "dlfs", event = "stop", %session_id, "console exited normally");
                    std::process::ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(service = "dlfs", event = "run_failed", error = %e, "console::run returned error");
                    eprintln!("dlfs: {e:#}");
                    std::process::ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "dlfs", event = "shutdown_signal", %session_id, "received Ctrl+C, exiting");
                std::process::ExitCode::SUCCESS
            }
        }
    });

    // a pending stdin read lives on the blocking pool; don't wait for it
    rt.shutdown_background();
    code
}
