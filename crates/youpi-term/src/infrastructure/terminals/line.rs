use std::fs::File;
use std::io;

use nix::errno::Errno;
use nix::sys::termios;
use nix::sys::termios::BaudRate;
use nix::sys::termios::ControlFlags;
use nix::sys::termios::InputFlags;
use nix::sys::termios::SetArg;
use nix::sys::termios::SpecialCharacterIndices;
use nix::sys::termios::Termios;

use crate::domain::models::TerminalError;

/// Factory speed of the Minitel serial socket.
pub const DEFAULT_BAUD: u32 = 1200;
pub const SUPPORTED_BAUDS: [u32; 4] = [300, 1200, 4800, 9600];

/// Serial line parameters of the Minitel: raw bytes, 7 data bits, even
/// parity, 1 stop bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSettings {
    pub baud: u32,
}

impl Default for LineSettings {
    fn default() -> LineSettings {
        return LineSettings { baud: DEFAULT_BAUD };
    }
}

/// Line discipline found on the device before it was configured.
pub struct SavedLine {
    device: File,
    termios: Termios,
}

impl LineSettings {
    fn baud_rate(&self) -> Result<BaudRate, TerminalError> {
        match self.baud {
            300 => return Ok(BaudRate::B300),
            1200 => return Ok(BaudRate::B1200),
            4800 => return Ok(BaudRate::B4800),
            9600 => return Ok(BaudRate::B9600),
            other => return Err(TerminalError::UnsupportedSpeed(other)),
        }
    }

    /// Switches `device` to raw mode: keys arrive one byte at a time, nothing
    /// is echoed and SEP (XOFF) is not taken for flow control.
    ///
    /// Devices that are not terminals are left untouched and `None` is
    /// returned.
    pub fn apply(&self, device: &File) -> Result<Option<SavedLine>, TerminalError> {
        let speed = self.baud_rate()?;
        let saved = match termios::tcgetattr(device) {
            Ok(saved) => saved,
            Err(Errno::ENOTTY) => {
                tracing::warn!("device is not a terminal, line settings left alone");
                return Ok(None);
            }
            Err(err) => return Err(io::Error::from(err).into()),
        };

        let mut raw = saved.clone();
        termios::cfmakeraw(&mut raw);
        termios::cfsetspeed(&mut raw, speed).map_err(io::Error::from)?;
        raw.control_flags &= !(ControlFlags::CSIZE | ControlFlags::PARODD | ControlFlags::CSTOPB);
        raw.control_flags |=
            ControlFlags::CS7 | ControlFlags::PARENB | ControlFlags::CREAD | ControlFlags::CLOCAL;
        raw.input_flags &= !(InputFlags::IXON | InputFlags::IXOFF | InputFlags::IXANY);
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
        termios::tcsetattr(device, SetArg::TCSANOW, &raw).map_err(io::Error::from)?;
        tracing::info!(baud = self.baud, "serial line set to raw 7E1");

        return Ok(Some(SavedLine {
            device: device.try_clone()?,
            termios: saved,
        }));
    }
}

impl SavedLine {
    /// Puts the original settings back once pending output is sent.
    pub fn restore(&self) -> Result<(), TerminalError> {
        termios::tcsetattr(&self.device, SetArg::TCSADRAIN, &self.termios)
            .map_err(io::Error::from)?;
        return Ok(());
    }
}
