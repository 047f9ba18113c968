use std::time::Duration;

use async_trait::async_trait;

use crate::domain::models::Action;
use crate::domain::models::ConsoleError;
use crate::domain::models::Key;
use crate::domain::models::Session;

pub const DEFAULT_INFO_TIMEOUT: Duration = Duration::from_secs(300);

const LINES: [&str; 13] = [
    "La rencontre des années 80:",
    "",
    "Youpi: ",
    "   Un bras robotique pour l'enseignement",
    "",
    "Le Minitel: ",
    "   L'ancêtre d'Internet",
    "",
    "... et du 21ème siècle:",
    "",
    "La RaspberryPi: ",
    "   Un ordinateur de la taille d'une ",
    "   carte de crédit",
];

/// Static presentation page, left with RETOUR or after `max_wait`.
pub struct DisplayInfos {
    max_wait: Duration,
}

impl Default for DisplayInfos {
    fn default() -> DisplayInfos {
        return DisplayInfos::new(DEFAULT_INFO_TIMEOUT);
    }
}

impl DisplayInfos {
    pub fn new(max_wait: Duration) -> DisplayInfos {
        return DisplayInfos { max_wait };
    }
}

#[async_trait]
impl Action for DisplayInfos {
    fn description(&self) -> String {
        return "quelques explications".to_string();
    }

    async fn run(&self, session: &mut Session) -> Result<(), ConsoleError> {
        let terminal = session.terminal.as_mut();
        terminal.clear_screen().await?;
        for (line, text) in LINES.iter().enumerate() {
            terminal.display_text(text, 0, line as u16 + 2).await?;
        }
        terminal
            .display_text_center("Retour : menu principal", 23)
            .await?;

        terminal
            .wait_for_key(Some(&[Key::Retour][..]), Some(self.max_wait))
            .await?;

        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::testing::fixture;
    use crate::domain::services::testing::press;
    use crate::domain::services::testing::Step;
    use crate::domain::services::testing::TerminalCall;

    #[tokio::test]
    async fn it_waits_for_retour_only() {
        let mut steps = press("12");
        steps.push(Step::Press(Key::Retour));
        let mut fx = fixture(steps, false);

        DisplayInfos::default().run(&mut fx.session).await.unwrap();

        assert!(fx.transcript.shows("Un bras robotique pour l'enseignement"));
        assert!(fx.transcript.calls().contains(&TerminalCall::Text {
            text: "La rencontre des années 80:".to_string(),
            x: 0,
            y: 2
        }));
        assert!(fx
            .transcript
            .calls()
            .contains(&TerminalCall::WaitForKey(Some(DEFAULT_INFO_TIMEOUT))));
        assert!(fx.arm_log.calls().is_empty());
    }

    #[tokio::test]
    async fn it_returns_after_timeout() {
        let mut fx = fixture(vec![Step::Timeout], false);
        let res = DisplayInfos::new(Duration::from_secs(5))
            .run(&mut fx.session)
            .await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn it_propagates_interruption() {
        let mut fx = fixture(vec![Step::Interrupt], false);
        let res = DisplayInfos::default().run(&mut fx.session).await;
        assert!(res.unwrap_err().is_interruption());
    }
}
