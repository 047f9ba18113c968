use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::Key;
use super::TerminalError;

/// Character-cell terminal the console renders on.
///
/// Row 0 is the status line. Coordinates are `(column, row)`, zero based.
#[async_trait]
pub trait TerminalService: Send {
    fn screen_width(&self) -> u16;

    /// Clears the whole display, status line included.
    async fn clear_all(&mut self) -> Result<(), TerminalError>;

    /// Clears the display below the status line.
    async fn clear_screen(&mut self) -> Result<(), TerminalError>;

    async fn clear_line(&mut self, y: u16) -> Result<(), TerminalError>;

    async fn display_text(&mut self, text: &str, x: u16, y: u16) -> Result<(), TerminalError>;

    async fn display_text_center(&mut self, text: &str, y: u16) -> Result<(), TerminalError> {
        let len = text.chars().count() as u16;
        let x = self.screen_width().saturating_sub(len) / 2;
        return self.display_text(text, x, y).await;
    }

    /// Writes `text` in inverse video on the status line, padded to the
    /// screen width.
    async fn display_status(&mut self, text: &str) -> Result<(), TerminalError>;

    async fn set_graphics_mode(&mut self, enabled: bool) -> Result<(), TerminalError>;

    async fn send(&mut self, bytes: &[u8]) -> Result<(), TerminalError>;

    async fn beep(&mut self) -> Result<(), TerminalError>;

    /// Waits for a key among `allowed` (any key when `None`). Other keys are
    /// discarded. Returns `Ok(None)` once `max_wait` has elapsed, and
    /// [`TerminalError::Interrupted`] as soon as the read is interrupted.
    async fn wait_for_key(
        &mut self,
        allowed: Option<&[Key]>,
        max_wait: Option<Duration>,
    ) -> Result<Option<Key>, TerminalError>;

    /// Handle cutting reads short from another task. Once cancelled, the
    /// pending read and every later one fail with
    /// [`TerminalError::Interrupted`].
    fn interrupter(&self) -> CancellationToken;

    async fn shutdown(&mut self) -> Result<(), TerminalError>;
}

pub type TerminalBox = Box<dyn TerminalService>;
