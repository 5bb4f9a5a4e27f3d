use crate::utils::error::{AgentError, Result};
use std::io::{BufRead, Write};

/// Asks for one line of input, returning it trimmed.
pub fn prompt_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<String> {
    write!(output, "{}: ", label)?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Err(AgentError::ConfigError {
            message: format!("No input received for '{}'", label),
        });
    }
    Ok(line.trim().to_string())
}

/// Keeps `current` when it holds a value, otherwise prompts for one.
pub fn fill_interactively<R: BufRead, W: Write>(
    current: Option<&str>,
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<String> {
    match current.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => Ok(value.to_string()),
        None => prompt_line(input, output, label),
    }
}

/// [`fill_interactively`] on the process stdin/stdout.
pub fn fill_from_stdin(current: Option<&str>, label: &str) -> Result<String> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    fill_interactively(current, &mut input, &mut output, label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_line_trims_input() {
        let mut input = Cursor::new("  espresso machine \n");
        let mut output = Vec::new();

        let value = prompt_line(&mut input, &mut output, "Enter a seed keyword").unwrap();

        assert_eq!(value, "espresso machine");
        assert_eq!(String::from_utf8(output).unwrap(), "Enter a seed keyword: ");
    }

    #[test]
    fn test_existing_value_skips_prompt() {
        let mut input = Cursor::new("ignored\n");
        let mut output = Vec::new();

        let value = fill_interactively(Some("serp-key"), &mut input, &mut output, "key").unwrap();

        assert_eq!(value, "serp-key");
        assert!(output.is_empty());
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();

        let err = fill_interactively(None, &mut input, &mut output, "key").unwrap_err();
        assert!(matches!(err, AgentError::ConfigError { .. }));
        assert!(err.user_friendly_message().starts_with("Configuration problem"));
        assert_eq!(err.exit_code(), 1);
    }
}
