//! Headless driver: feeds a scripted sequence of input events to a
//! [`SearchControl`] in real time and collects the navigations it causes.
//!
//! Script format, one command per line:
//!
//! ```text
//! # one input event carrying the whole value
//! input war and peace
//! # one input event per character: d, du, dun, dune
//! type dune
//! select movies
//! wait 400
//! unmount
//! ```

use std::time::Duration;

use crate::router::{MemoryRouter, Navigation};
use crate::search::SearchControl;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Input(String),
    Type(String),
    Select(String),
    Wait(Duration),
    Unmount,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: `{command}` needs an argument")]
    MissingArgument { line: usize, command: String },
    #[error("line {line}: invalid wait duration `{value}`")]
    InvalidWait { line: usize, value: String },
    #[error("line {line}: commands after `unmount`")]
    AfterUnmount { line: usize },
}

/// Parse a replay script. Blank lines and `#` comments are skipped.
pub fn parse_script(script: &str) -> Result<Vec<Step>, ReplayError> {
    let mut steps = Vec::new();
    let mut unmounted = false;

    for (index, raw) in script.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if unmounted {
            return Err(ReplayError::AfterUnmount { line });
        }

        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim_start()),
            None => (trimmed, ""),
        };

        let step = match command {
            "input" => Step::Input(rest.to_string()),
            "type" | "select" | "wait" if rest.is_empty() => {
                return Err(ReplayError::MissingArgument {
                    line,
                    command: command.to_string(),
                })
            }
            "type" => Step::Type(rest.to_string()),
            "select" => Step::Select(rest.to_string()),
            "wait" => {
                let ms = rest.parse::<u64>().map_err(|_| ReplayError::InvalidWait {
                    line,
                    value: rest.to_string(),
                })?;
                Step::Wait(Duration::from_millis(ms))
            }
            "unmount" => {
                unmounted = true;
                Step::Unmount
            }
            other => {
                return Err(ReplayError::UnknownCommand {
                    line,
                    command: other.to_string(),
                })
            }
        };
        steps.push(step);
    }

    Ok(steps)
}

/// Run `steps` against `control`, returning the navigations recorded on
/// `router` while the script ran.
///
/// Characters of a `type` step are `keystroke_gap` apart. Unless the script
/// unmounts, the run ends by idling one debounce delay so a pending search
/// lands.
pub async fn run(
    steps: Vec<Step>,
    mut control: SearchControl,
    router: &MemoryRouter,
    keystroke_gap: Duration,
) -> Vec<Navigation> {
    let before = router.navigations().len();
    let mut unmounted = false;

    for step in steps {
        match step {
            Step::Input(value) => {
                tracing::debug!("replay: input {:?}", value);
                control.on_input(value);
            }
            Step::Type(text) => {
                let mut value = String::new();
                for (i, c) in text.chars().enumerate() {
                    if i > 0 {
                        tokio::time::sleep(keystroke_gap).await;
                    }
                    value.push(c);
                    control.on_input(value.clone());
                }
            }
            Step::Select(category) => {
                control.handle_category_change(&category);
            }
            Step::Wait(duration) => tokio::time::sleep(duration).await,
            Step::Unmount => {
                unmounted = true;
                break;
            }
        }
    }

    if unmounted {
        control.unmount();
    } else {
        tokio::time::sleep(control.delay()).await;
    }

    router.navigations_since(before)
}
