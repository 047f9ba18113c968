use async_trait::async_trait;

use super::ConsoleError;
use super::Session;

/// An entry of the main menu.
#[async_trait]
pub trait Action: Send + Sync {
    /// Label used when the action is registered without an explicit one.
    fn description(&self) -> String;

    async fn run(&self, session: &mut Session) -> Result<(), ConsoleError>;
}

pub type ActionBox = Box<dyn Action>;
