//! Line based prompts for the interactive menu.

use std::io::{BufRead, Write};

use crate::Error;

/// Asks questions on `output` and reads the answers from `input`, one line
/// per answer.
///
/// End of input is reported as `None` by every method that reads an answer,
/// so callers can end the session cleanly when the user presses Ctrl+D.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter that reads from `input` and writes to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the input and output.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Print `message` followed by a new line.
    pub fn say(&mut self, message: impl AsRef<str>) -> Result<(), Error> {
        writeln!(self.output, "{}", message.as_ref())?;
        Ok(())
    }

    /// Print `error` in red with its first letter capitalised.
    pub fn print_error(&mut self, error: impl ToString) -> Result<(), Error> {
        writeln!(
            self.output,
            "\x1b[31;1m{}\x1b[0m",
            capitalise_first_char(&error.to_string())
        )?;
        Ok(())
    }

    /// Print `question` and read one line of input.
    ///
    /// The answer is returned without its line ending, or `None` at end of
    /// input.
    pub fn ask(&mut self, question: &str) -> Result<Option<String>, Error> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    /// Ask `question` until the answer is accepted by `parse`.
    ///
    /// Rejected answers are reported with [Prompter::print_error] before
    /// asking again.
    pub fn ask_until<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> Result<T, Error>,
    ) -> Result<Option<T>, Error> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };

            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(error) => {
                    tracing::debug!("Rejected answer {answer:?}: {error}");
                    self.print_error(error)?;
                }
            }
        }
    }

    /// Like [Prompter::ask_until], but a blank answer selects `current`.
    pub fn ask_or_keep<T: Clone>(
        &mut self,
        question: &str,
        current: T,
        parse: impl Fn(&str) -> Result<T, Error>,
    ) -> Result<Option<T>, Error> {
        self.ask_until(question, |answer| {
            if answer.trim().is_empty() {
                Ok(current.clone())
            } else {
                parse(answer)
            }
        })
    }

    /// Show a numbered menu and ask until one of its options is picked.
    ///
    /// Returns the 0-based position of the chosen option in `options`.
    pub fn choose(
        &mut self,
        heading: &str,
        options: &[&str],
        question: &str,
    ) -> Result<Option<usize>, Error> {
        self.say(heading)?;
        for (number, option) in (1..).zip(options) {
            self.say(format!("  {number}. {option}"))?;
        }

        self.ask_until(question, |answer| parse_option(answer, options.len()))
    }

    /// Ask a yes/no question until the answer is one of Y, Yes, N or No.
    pub fn confirm(&mut self, question: &str) -> Result<Option<bool>, Error> {
        self.ask_until(question, parse_confirmation)
    }
}

/// Parse a 1-based menu option into a 0-based position.
fn parse_option(answer: &str, option_count: usize) -> Result<usize, Error> {
    match answer.trim().parse::<usize>() {
        Ok(number) if (1..=option_count).contains(&number) => Ok(number - 1),
        _ => Err(Error::InvalidOption(answer.to_owned(), option_count)),
    }
}

fn parse_confirmation(answer: &str) -> Result<bool, Error> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(Error::InvalidConfirmation(answer.to_owned())),
    }
}

/// Uppercase the first character of `string`.
pub fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}
