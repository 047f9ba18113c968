use std::fmt;

/// Separator byte introducing a Minitel function key code.
pub const SEP: u8 = 0x13;

/// A keystroke received from the terminal keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Envoi,
    Retour,
    Repetition,
    Guide,
    Annulation,
    Sommaire,
    Correction,
    Suite,
}

impl Key {
    /// Decodes the byte following [`SEP`] in a Minitel function key sequence.
    pub fn from_function_code(code: u8) -> Option<Key> {
        let key = match code {
            0x41 => Key::Envoi,
            0x42 => Key::Retour,
            0x43 => Key::Repetition,
            0x44 => Key::Guide,
            0x45 => Key::Annulation,
            0x46 => Key::Sommaire,
            0x47 => Key::Correction,
            0x48 => Key::Suite,
            _ => return None,
        };

        return Some(key);
    }

    pub fn digit(&self) -> Option<u32> {
        if let Key::Char(c) = self {
            return c.to_digit(10);
        }

        return None;
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            other => write!(f, "{}", format!("{other:?}").to_uppercase()),
        }
    }
}

/// Decodes the raw byte stream coming from the terminal into keys.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    pending_sep: bool,
}

impl KeyDecoder {
    pub fn feed(&mut self, byte: u8) -> Option<Key> {
        if self.pending_sep {
            self.pending_sep = false;
            return Key::from_function_code(byte);
        }

        match byte {
            SEP => {
                self.pending_sep = true;
                return None;
            }
            b'\r' | b'\n' => return Some(Key::Envoi),
            0x08 | 0x7f => return Some(Key::Correction),
            0x1b => return Some(Key::Sommaire),
            0x20..=0x7e => return Some(Key::Char(byte as char)),
            _ => return None,
        }
    }
}

#[cfg(test)]
#[path = "key_test.rs"]
mod tests;
