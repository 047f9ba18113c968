use std::io;
use std::io::Read;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use crossterm::cursor;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use nix::fcntl::OFlag;
use tokio::io::AsyncWrite;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::domain::models::Key;
use crate::domain::models::KeyDecoder;
use crate::domain::models::TerminalError;
use crate::domain::models::TerminalService;

use super::to_line_charset;
use super::LineSettings;
use super::SavedLine;

pub const MINITEL_WIDTH: u16 = 40;
const STATUS_ROW: u16 = 0;
const BEL: u8 = 0x07;

type Writer = Box<dyn AsyncWrite + Send + Unpin>;

/// Minitel driven in its ANSI (téléinformatique) mode over a serial line.
///
/// Screen updates are encoded as ANSI escape sequences, folded to the 7-bit
/// line charset and flushed after every operation. Keyboard bytes are read
/// on a dedicated thread and decoded into [`Key`] values.
pub struct AnsiTerminal {
    writer: Writer,
    keys: mpsc::UnboundedReceiver<Key>,
    interrupt: CancellationToken,
    line: Option<SavedLine>,
    width: u16,
}

impl AnsiTerminal {
    pub fn new(writer: Writer, keys: mpsc::UnboundedReceiver<Key>) -> AnsiTerminal {
        return AnsiTerminal {
            writer,
            keys,
            interrupt: CancellationToken::new(),
            line: None,
            width: MINITEL_WIDTH,
        };
    }

    /// Opens the serial device for reading and writing and configures the
    /// line with `settings`. The original line settings come back on
    /// [`TerminalService::shutdown`].
    pub fn open(device: &Path, settings: LineSettings) -> Result<AnsiTerminal, TerminalError> {
        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(OFlag::O_NOCTTY.bits())
            .open(device)?;
        let line = settings.apply(&file)?;
        let reader = file.try_clone()?;

        let (tx, rx) = mpsc::unbounded_channel();
        spawn_reader(reader, tx)?;

        let writer = tokio::fs::File::from_std(file);
        let mut terminal = AnsiTerminal::new(Box::new(writer), rx);
        terminal.line = line;
        return Ok(terminal);
    }

    async fn write(&mut self, buf: &[u8]) -> Result<(), TerminalError> {
        self.writer.write_all(buf).await?;
        self.writer.flush().await?;

        return Ok(());
    }
}

/// Decodes bytes from `reader` until end of input, forwarding keys to `tx`.
///
/// Runs on a plain thread: a blocking read on a tty cannot be cancelled and
/// must not hold up the runtime shutdown.
pub fn spawn_reader<R: Read + Send + 'static>(
    mut reader: R,
    tx: mpsc::UnboundedSender<Key>,
) -> io::Result<()> {
    thread::Builder::new()
        .name("minitel-reader".to_string())
        .spawn(move || {
            let mut decoder = KeyDecoder::default();
            let mut buf = [0u8; 64];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => {
                        tracing::info!("terminal input closed");
                        return;
                    }
                    Ok(n) => {
                        for byte in &buf[..n] {
                            if let Some(key) = decoder.feed(*byte) {
                                if tx.send(key).is_err() {
                                    return;
                                }
                            }
                        }
                    }
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => {
                        tracing::warn!(error = %err, "terminal read failed");
                        return;
                    }
                }
            }
        })?;

    return Ok(());
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[async_trait]
impl TerminalService for AnsiTerminal {
    fn screen_width(&self) -> u16 {
        return self.width;
    }

    async fn clear_all(&mut self) -> Result<(), TerminalError> {
        let mut buf: Vec<u8> = vec![];
        queue!(
            buf,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        return self.write(&buf).await;
    }

    async fn clear_screen(&mut self) -> Result<(), TerminalError> {
        let mut buf: Vec<u8> = vec![];
        queue!(
            buf,
            cursor::MoveTo(0, STATUS_ROW + 1),
            terminal::Clear(terminal::ClearType::FromCursorDown)
        )?;
        return self.write(&buf).await;
    }

    async fn clear_line(&mut self, y: u16) -> Result<(), TerminalError> {
        let mut buf: Vec<u8> = vec![];
        queue!(
            buf,
            cursor::MoveTo(0, y),
            terminal::Clear(terminal::ClearType::CurrentLine)
        )?;
        return self.write(&buf).await;
    }

    async fn display_text(&mut self, text: &str, x: u16, y: u16) -> Result<(), TerminalError> {
        let mut buf: Vec<u8> = vec![];
        queue!(buf, cursor::MoveTo(x, y), style::Print(to_line_charset(text)))?;
        return self.write(&buf).await;
    }

    async fn display_status(&mut self, text: &str) -> Result<(), TerminalError> {
        let width = self.width as usize;
        let line: String = to_line_charset(text).chars().take(width).collect();

        let mut buf: Vec<u8> = vec![];
        queue!(
            buf,
            cursor::MoveTo(0, STATUS_ROW),
            style::SetAttribute(style::Attribute::Reverse),
            style::Print(format!("{line:<width$}")),
            style::SetAttribute(style::Attribute::Reset)
        )?;
        return self.write(&buf).await;
    }

    async fn set_graphics_mode(&mut self, enabled: bool) -> Result<(), TerminalError> {
        // DEC special graphics character set.
        let sequence: &[u8] = if enabled { b"\x1b(0" } else { b"\x1b(B" };
        return self.write(sequence).await;
    }

    async fn send(&mut self, bytes: &[u8]) -> Result<(), TerminalError> {
        return self.write(bytes).await;
    }

    async fn beep(&mut self) -> Result<(), TerminalError> {
        return self.write(&[BEL]).await;
    }

    async fn wait_for_key(
        &mut self,
        allowed: Option<&[Key]>,
        max_wait: Option<Duration>,
    ) -> Result<Option<Key>, TerminalError> {
        let deadline = max_wait.map(|wait| Instant::now() + wait);

        loop {
            let key = tokio::select! {
                biased;
                _ = self.interrupt.cancelled() => return Err(TerminalError::Interrupted),
                key = self.keys.recv() => match key {
                    Some(key) => key,
                    None => return Err(TerminalError::Disconnected),
                },
                _ = sleep_until(deadline) => return Ok(None),
            };

            if allowed.map_or(true, |keys| keys.contains(&key)) {
                return Ok(Some(key));
            }
            tracing::debug!(%key, "ignoring key");
        }
    }

    fn interrupter(&self) -> CancellationToken {
        return self.interrupt.clone();
    }

    async fn shutdown(&mut self) -> Result<(), TerminalError> {
        let mut buf: Vec<u8> = vec![];
        queue!(
            buf,
            style::SetAttribute(style::Attribute::Reset),
            cursor::Show
        )?;
        self.write(&buf).await?;

        if let Some(line) = self.line.take() {
            line.restore()?;
        }

        return Ok(());
    }
}

#[cfg(test)]
#[path = "ansi_test.rs"]
mod tests;
