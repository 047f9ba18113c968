use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ArmName;
use crate::domain::models::ConsoleError;
use crate::domain::models::Session;
use crate::domain::models::SessionState;
use crate::domain::models::TerminalService;
use crate::domain::services::ActionRegistry;
use crate::domain::services::DisplayInfos;
use crate::domain::services::DispatchLoop;
use crate::domain::services::LoopExit;
use crate::domain::services::ManualControl;
use crate::infrastructure::arms::ArmManager;
use crate::infrastructure::terminals::AnsiTerminal;
use crate::infrastructure::terminals::LineSettings;

const BANNER: &str = "Démonstration YouPinitel";
const FAREWELL: &str = "I'll be back...";
const FAREWELL_ROW: u16 = 12;

/// Settings of a console run, resolved from the configuration layers.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleOptions {
    pub minitel_device: PathBuf,
    pub minitel_baud: u32,
    pub exit_allowed: bool,
    pub idle_timeout: Duration,
    pub info_timeout: Duration,
    pub arm: ArmName,
    pub motion_delay: Duration,
}

impl ConsoleOptions {
    pub fn from_config() -> Result<ConsoleOptions> {
        let arm_name = Config::get(ConfigKey::Arm);
        let Some(arm) = ArmName::parse(&arm_name) else {
            bail!(format!("Unknown arm backend {arm_name}"));
        };

        return Ok(ConsoleOptions {
            minitel_device: PathBuf::from(Config::get(ConfigKey::MinitelDevice)),
            minitel_baud: u32::try_from(Config::get_u64(ConfigKey::MinitelBaud)?)?,
            exit_allowed: Config::get_bool(ConfigKey::ExitAllowed),
            idle_timeout: Config::get_duration_secs(ConfigKey::IdleTimeout)?,
            info_timeout: Config::get_duration_secs(ConfigKey::InfoTimeout)?,
            arm,
            motion_delay: Duration::from_millis(Config::get_u64(ConfigKey::MotionDelayMs)?),
        });
    }
}

/// Main menu entries, in display order.
pub fn default_registry(options: &ConsoleOptions) -> ActionRegistry {
    return ActionRegistry::builder()
        .action(DisplayInfos::new(options.info_timeout))
        .action(ManualControl::new(options.idle_timeout))
        .build();
}

/// Opens the Minitel and the arm, then runs the main menu until the operator
/// leaves it or the process is asked to stop.
pub async fn start(options: ConsoleOptions) -> Result<()> {
    let device = &options.minitel_device;
    if !device.exists() {
        bail!(format!("device not found : {}", device.display()));
    }

    tracing::info!(device = %device.display(), "initializing Minitel proxy");
    let state = SessionState::new(options.exit_allowed);
    let settings = LineSettings {
        baud: options.minitel_baud,
    };
    let terminal = AnsiTerminal::open(device, settings)?;
    let interrupter = terminal.interrupter();
    let arm = ArmManager::get(options.arm, options.motion_delay)?;
    tracing::info!(arm = %arm.name(), "arm ready");

    let mut session = Session::new(Box::new(terminal), arm, state.clone());
    let dispatch = DispatchLoop::new(default_registry(&options));

    let watcher = watch_shutdown(shutdown_signal(), state, interrupter);
    let res = run_session(&dispatch, &mut session).await;
    watcher.abort();
    res?;

    tracing::info!("console stopped");
    return Ok(());
}

/// Shows the banner, runs the dispatch loop and says goodbye.
pub async fn run_session(
    dispatch: &DispatchLoop,
    session: &mut Session,
) -> Result<LoopExit, ConsoleError> {
    session.terminal.clear_all().await?;
    session.terminal.display_status(BANNER).await?;

    let exit = dispatch.run(session).await?;
    tracing::info!(exit = ?exit, "main menu left");

    session.terminal.clear_all().await?;
    session
        .terminal
        .display_text_center(FAREWELL, FAREWELL_ROW)
        .await?;
    session.terminal.shutdown().await?;

    return Ok(exit);
}

/// Marks the session terminated once `signal` resolves and cuts the pending
/// key read short.
fn watch_shutdown<F>(signal: F, state: SessionState, interrupter: CancellationToken) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    return tokio::spawn(async move {
        signal.await;
        tracing::info!("signal received, terminating session");
        state.terminate();
        interrupter.cancel();
    });
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = ?err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
#[path = "console_test.rs"]
mod tests;
