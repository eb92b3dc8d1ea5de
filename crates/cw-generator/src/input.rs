//! Line-oriented input for the interactive terminal.

use cw_core::{Difficulty, Event, HintCount, QueryError};

/// What one input line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Events to dispatch, in order.
    Events(Vec<Event>),
    Help,
    Quit,
}

/// Interpret one line typed by the user.
///
/// Plain text sets the word and submits. Commands start with `/`.
/// Clue numbers are 1-based on input.
pub fn parse_line(line: &str) -> Result<Input, InputError> {
    let line = line.trim();

    let Some(command) = line.strip_prefix('/') else {
        return Ok(Input::Events(vec![
            Event::WordChanged(line.to_string()),
            Event::Submit,
        ]));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "count" | "c" => {
            let count: HintCount = arg.parse()?;
            Ok(Input::Events(vec![Event::HintCountSelected(count)]))
        }
        "difficulty" | "d" => {
            let difficulty: Difficulty = arg.parse()?;
            Ok(Input::Events(vec![Event::DifficultySelected(difficulty)]))
        }
        "copy" | "y" => {
            let number: usize = arg
                .parse()
                .map_err(|_| InputError::InvalidClueNumber(arg.to_string()))?;
            if number == 0 {
                return Err(InputError::InvalidClueNumber(arg.to_string()));
            }
            Ok(Input::Events(vec![Event::CopyClue(number - 1)]))
        }
        "clear" => Ok(Input::Events(vec![Event::Clear])),
        "help" | "h" | "?" => Ok(Input::Help),
        "quit" | "q" | "exit" => Ok(Input::Quit),
        other => Err(InputError::UnknownCommand(other.to_string())),
    }
}

/// Rejected input line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("invalid clue number: {0:?}")]
    InvalidClueNumber(String),

    #[error("unknown command: /{0} (try /help)")]
    UnknownCommand(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_submits() {
        assert_eq!(
            parse_line("  بحر  ").unwrap(),
            Input::Events(vec![Event::WordChanged("بحر".to_string()), Event::Submit])
        );
    }

    #[test]
    fn test_blank_line_still_submits_and_controller_ignores_it() {
        assert_eq!(
            parse_line("   ").unwrap(),
            Input::Events(vec![Event::WordChanged(String::new()), Event::Submit])
        );
    }

    #[test]
    fn test_selectors() {
        assert_eq!(
            parse_line("/count 10").unwrap(),
            Input::Events(vec![Event::HintCountSelected(HintCount::Ten)])
        );
        assert_eq!(
            parse_line("/d riddle").unwrap(),
            Input::Events(vec![Event::DifficultySelected(Difficulty::Riddle)])
        );
        assert_eq!(
            parse_line("/count 4"),
            Err(InputError::Query(QueryError::UnsupportedHintCount(4)))
        );
    }

    #[test]
    fn test_copy_is_one_based() {
        assert_eq!(
            parse_line("/copy 1").unwrap(),
            Input::Events(vec![Event::CopyClue(0)])
        );
        assert!(parse_line("/copy 0").is_err());
        assert!(parse_line("/copy x").is_err());
    }

    #[test]
    fn test_other_commands() {
        assert_eq!(parse_line("/clear").unwrap(), Input::Events(vec![Event::Clear]));
        assert_eq!(parse_line("/help").unwrap(), Input::Help);
        assert_eq!(parse_line("/q").unwrap(), Input::Quit);
        assert_eq!(
            parse_line("/dance"),
            Err(InputError::UnknownCommand("dance".to_string()))
        );
    }
}
