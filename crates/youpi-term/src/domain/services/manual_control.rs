use std::time::Duration;

use async_trait::async_trait;

use crate::domain::models::Action;
use crate::domain::models::ConsoleError;
use crate::domain::models::Joint;
use crate::domain::models::Key;
use crate::domain::models::ManualKey;
use crate::domain::models::Session;
use crate::domain::models::TerminalError;
use crate::domain::models::TerminalService;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

const HELP_LINES: [&str; 11] = [
    "Utilisez les touches du clavier",
    "pour contrôler le bras.",
    "",
    "1 4 : épaule",
    "2 5 : coude",
    "3 6 : poignet",
    "7 9 : rotation bras",
    "* # : rotation pince",
    "O F : ouverture/fermeture pince",
    "",
    " R  : retour position initiale",
];
const FOOTER: &str = "Retour : menu principal";
const MESSAGE_ROW: u16 = 21;
const READY_STATUS: &str = "Contrôle manuel : prêt";
const MOTION_STATUS: &str = "Mouvement en cours...";
const INVALID_KEY: &str = "Touche invalide";
const LIMIT_REACHED: &str = "Limite mécanique atteinte";

/// Drives the arm joint by joint from the keyboard.
///
/// RETOUR, or no key at all during the idle timeout, brings the arm back
/// to its home pose before returning to the main menu. Mechanical limit
/// faults, homing included, are reported to the operator and never reach
/// the main menu.
pub struct ManualControl {
    idle_timeout: Duration,
}

impl Default for ManualControl {
    fn default() -> ManualControl {
        return ManualControl::new(DEFAULT_IDLE_TIMEOUT);
    }
}

impl ManualControl {
    pub fn new(idle_timeout: Duration) -> ManualControl {
        return ManualControl { idle_timeout };
    }

    async fn show_help(&self, terminal: &mut dyn TerminalService) -> Result<(), TerminalError> {
        terminal.clear_screen().await?;
        for (line, text) in HELP_LINES.iter().enumerate() {
            terminal.display_text(text, 0, line as u16 + 4).await?;
        }
        terminal.display_text_center(FOOTER, 23).await?;
        terminal.display_status(READY_STATUS).await?;

        return Ok(());
    }

    async fn show_message(
        &self,
        terminal: &mut dyn TerminalService,
        message: &str,
    ) -> Result<(), TerminalError> {
        terminal.clear_line(MESSAGE_ROW).await?;
        if !message.is_empty() {
            terminal.display_text_center(message, MESSAGE_ROW).await?;
        }

        return Ok(());
    }

    async fn return_home(&self, session: &mut Session) -> Result<(), ConsoleError> {
        session.terminal.clear_screen().await?;
        session
            .terminal
            .display_text_center("Réinitialisation du bras", 5)
            .await?;
        session
            .terminal
            .display_text_center("Veuillez patienter...", 7)
            .await?;

        match session.arm.go_home(&Joint::all_but_gripper(), true).await {
            Ok(()) => return Ok(()),
            Err(err) if err.is_mechanical_limit() => {
                tracing::warn!(error = %err, "mechanical limit reached while homing");
                session.terminal.beep().await?;
                self.show_message(session.terminal.as_mut(), LIMIT_REACHED)
                    .await?;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }
    }
}

#[async_trait]
impl Action for ManualControl {
    fn description(&self) -> String {
        return "contrôle manuel".to_string();
    }

    async fn run(&self, session: &mut Session) -> Result<(), ConsoleError> {
        self.show_help(session.terminal.as_mut()).await?;

        loop {
            let key = session
                .terminal
                .wait_for_key(None, Some(self.idle_timeout))
                .await?;

            let key = match key {
                None => {
                    tracing::info!("no input, returning to main menu");
                    return self.return_home(session).await;
                }
                Some(Key::Retour) => return self.return_home(session).await,
                Some(key) => key,
            };

            let Some(manual_key) = ManualKey::from_key(key) else {
                tracing::debug!(%key, "invalid key");
                session.terminal.beep().await?;
                self.show_message(session.terminal.as_mut(), INVALID_KEY)
                    .await?;
                continue;
            };

            session.terminal.display_status(MOTION_STATUS).await?;
            match manual_key.command().execute(&mut session.arm).await {
                Ok(()) => {
                    self.show_message(session.terminal.as_mut(), "").await?;
                }
                Err(err) if err.is_mechanical_limit() => {
                    tracing::warn!(error = %err, "mechanical limit reached");
                    session.terminal.beep().await?;
                    self.show_message(session.terminal.as_mut(), LIMIT_REACHED)
                        .await?;
                }
                Err(err) => return Err(err.into()),
            }
            session.terminal.display_status(READY_STATUS).await?;
        }
    }
}

#[cfg(test)]
#[path = "manual_control_test.rs"]
mod tests;
