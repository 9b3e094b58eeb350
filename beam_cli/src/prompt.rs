//! Line-oriented prompts over any reader/writer pair.

use std::io::{BufRead, Write};
use std::str::FromStr;

use beam_core::errors::{CalcError, CalcResult};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

fn io_error(operation: &str, e: std::io::Error) -> CalcError {
    CalcError::file_error(operation, "<terminal>", e.to_string())
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Print a line
    pub fn say(&mut self, message: &str) -> CalcResult<()> {
        writeln!(self.output, "{}", message).map_err(|e| io_error("write", e))
    }

    /// Print text without a trailing newline
    pub fn show(&mut self, text: &str) -> CalcResult<()> {
        write!(self.output, "{}", text).map_err(|e| io_error("write", e))
    }

    /// Ask for one trimmed line. End of input is an error.
    pub fn line(&mut self, prompt: &str) -> CalcResult<String> {
        self.show(prompt)?;
        self.output.flush().map_err(|e| io_error("flush", e))?;

        let mut buf = String::new();
        let read = self
            .input
            .read_line(&mut buf)
            .map_err(|e| io_error("read", e))?;
        if read == 0 {
            return Err(CalcError::file_error("read", "<terminal>", "unexpected end of input"));
        }
        Ok(buf.trim().to_string())
    }

    /// Yes/no question; a blank answer takes `default`.
    pub fn yes_no(&mut self, prompt: &str, default: bool) -> CalcResult<bool> {
        let answer = self.line(prompt)?.to_lowercase();
        if answer.is_empty() {
            return Ok(default);
        }
        Ok(matches!(answer.as_str(), "y" | "yes"))
    }

    /// Free text; blank means `None`.
    pub fn optional(&mut self, prompt: &str) -> CalcResult<Option<String>> {
        let answer = self.line(prompt)?;
        Ok(if answer.is_empty() { None } else { Some(answer) })
    }

    /// Optional parsed value. Blank or unparsable input gives `None`; the
    /// latter with a notice naming `what`.
    pub fn optional_parsed<T: FromStr>(&mut self, prompt: &str, what: &str) -> CalcResult<Option<T>> {
        match self.optional(prompt)? {
            None => Ok(None),
            Some(text) => match text.parse() {
                Ok(value) => Ok(Some(value)),
                Err(_) => {
                    self.say(&format!("Invalid {}, skipping.", what))?;
                    Ok(None)
                }
            },
        }
    }

    /// Ask until a number is entered.
    pub fn number(&mut self, prompt: &str) -> CalcResult<f64> {
        loop {
            match self.line(prompt)?.parse::<f64>() {
                Ok(value) => return Ok(value),
                Err(_) => self.say("Please enter a valid number.")?,
            }
        }
    }

    /// Number with a default for blank or invalid input.
    pub fn number_or(&mut self, prompt: &str, default: f64) -> CalcResult<f64> {
        let answer = self.line(prompt)?;
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse() {
            Ok(value) => Ok(value),
            Err(_) => {
                self.say(&format!("Invalid number, using {}.", default))?;
                Ok(default)
            }
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_yes_no_defaults() {
        let mut p = prompter("\nn\nYES\nmaybe\n");
        assert!(p.yes_no("? ", true).unwrap());
        assert!(!p.yes_no("? ", true).unwrap());
        assert!(p.yes_no("? ", false).unwrap());
        assert!(!p.yes_no("? ", true).unwrap());
    }

    #[test]
    fn test_number_retries_until_valid() {
        let mut p = prompter("abc\n\n2.5\n");
        assert_eq!(p.number("L: ").unwrap(), 2.5);
        let out = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(out.matches("Please enter a valid number.").count(), 2);
    }

    #[test]
    fn test_number_or_blank_and_invalid() {
        let mut p = prompter("\nx\n-3\n");
        assert_eq!(p.number_or("M: ", 0.0).unwrap(), 0.0);
        assert_eq!(p.number_or("F: ", 0.0).unwrap(), 0.0);
        assert_eq!(p.number_or("T: ", 0.0).unwrap(), -3.0);
    }

    #[test]
    fn test_optional_parsed() {
        let mut p = prompter("\n4\nfour\n");
        assert_eq!(p.optional_parsed::<u32>("walls: ", "wall count").unwrap(), None);
        assert_eq!(p.optional_parsed::<u32>("walls: ", "wall count").unwrap(), Some(4));
        assert_eq!(p.optional_parsed::<u32>("walls: ", "wall count").unwrap(), None);
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Invalid wall count, skipping."));
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let mut p = prompter("");
        let err = p.number("L: ").unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
