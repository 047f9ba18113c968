use crate::domain::models::Key;
use crate::domain::models::TerminalError;
use crate::domain::models::TerminalService;

const LEFT_MARGIN: u16 = 4;
const PROMPT_COLUMN: u16 = 2;
const QUIT_HINT: &str = "SOMMAIRE : fin";

/// Numbered choice list read from the keyboard.
///
/// The operator types the number of an entry and validates with ENVOI.
/// CORRECTION erases the last digit and ANNULATION the whole input. Only
/// numbers within the list are ever returned; anything else beeps.
pub struct Menu<'a> {
    title: &'a str,
    choices: Vec<&'a str>,
    prompt: &'a str,
    line_skip: u16,
    margin_top: u16,
    prompt_line: u16,
    cancelable: bool,
}

impl<'a> Menu<'a> {
    pub fn new(title: &'a str, choices: Vec<&'a str>) -> Menu<'a> {
        return Menu {
            title,
            choices,
            prompt: "Votre choix",
            line_skip: 2,
            margin_top: 1,
            prompt_line: 20,
            cancelable: false,
        };
    }

    /// Shows the quit hint and lets SOMMAIRE cancel the menu.
    pub fn cancelable(mut self, cancelable: bool) -> Menu<'a> {
        self.cancelable = cancelable;
        return self;
    }

    fn field_width(&self) -> usize {
        return self.choices.len().to_string().len();
    }

    fn field_column(&self) -> u16 {
        return PROMPT_COLUMN + self.prompt.chars().count() as u16 + 3;
    }

    pub async fn display(&self, terminal: &mut dyn TerminalService) -> Result<(), TerminalError> {
        terminal.clear_screen().await?;

        let title_row = 1 + self.margin_top;
        let underline = "-".repeat(self.title.chars().count());
        terminal.display_text_center(self.title, title_row).await?;
        terminal.display_text_center(&underline, title_row + 1).await?;

        let mut row = title_row + 1 + self.line_skip;
        for (index, choice) in self.choices.iter().enumerate() {
            terminal
                .display_text(&format!("{} - {}", index + 1, choice), LEFT_MARGIN, row)
                .await?;
            row += self.line_skip;
        }

        let prompt = format!(
            "{} : {} + ENVOI",
            self.prompt,
            ".".repeat(self.field_width())
        );
        terminal
            .display_text(&prompt, PROMPT_COLUMN, self.prompt_line)
            .await?;

        if self.cancelable {
            terminal.display_text_center(QUIT_HINT, 23).await?;
        }

        return Ok(());
    }

    /// Reads a selection. `None` means the operator cancelled, either with
    /// SOMMAIRE or by validating an empty input.
    pub async fn get_choice(
        &self,
        terminal: &mut dyn TerminalService,
    ) -> Result<Option<usize>, TerminalError> {
        let mut allowed: Vec<Key> = ('0'..='9').map(Key::Char).collect();
        allowed.extend([Key::Envoi, Key::Correction, Key::Annulation]);
        if self.cancelable {
            allowed.push(Key::Sommaire);
        }

        let width = self.field_width();
        let mut input = String::new();
        loop {
            let Some(key) = terminal.wait_for_key(Some(allowed.as_slice()), None).await? else {
                continue;
            };

            match key {
                Key::Sommaire => return Ok(None),
                Key::Envoi => {
                    if input.is_empty() {
                        return Ok(None);
                    }
                    match input.parse::<usize>() {
                        Ok(choice) if (1..=self.choices.len()).contains(&choice) => {
                            return Ok(Some(choice));
                        }
                        _ => {
                            tracing::debug!(input = %input, "out of range menu input");
                            terminal.beep().await?;
                            input.clear();
                        }
                    }
                }
                Key::Correction => {
                    input.pop();
                }
                Key::Annulation => input.clear(),
                Key::Char(c) if c.is_ascii_digit() => {
                    if input.len() < width {
                        input.push(c);
                    } else {
                        terminal.beep().await?;
                    }
                }
                _ => continue,
            }

            terminal
                .display_text(
                    &format!("{input:.<width$}"),
                    self.field_column(),
                    self.prompt_line,
                )
                .await?;
        }
    }
}

#[cfg(test)]
#[path = "menu_test.rs"]
mod tests;
