//! Line-oriented scripts that stand in for a user clicking around the board.

use crate::session::UiEvent;
use devjobs::board::JobId;
use devjobs::error::AppError;
use std::time::Duration;

/// Gap between the prefixes emitted for a `type` line.
pub(crate) const KEYSTROKE_INTERVAL: Duration = Duration::from_millis(80);

pub(crate) const BUILTIN_SCRIPT: &str = "\
# Narrow to frontend work that mentions a *Script tag
role frontend on
tech Script on
sort company
# Typed quickly, so only the final text is searched
type react
wait 400
sort salary
location remote
experience entry
clear
apply job-001
load-more
wait 2500
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScriptStep {
    Event(UiEvent),
    Wait(Duration),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("line {line}: {detail}")]
pub(crate) struct ScriptError {
    pub(crate) line: usize,
    pub(crate) detail: String,
}

impl From<ScriptError> for AppError {
    fn from(value: ScriptError) -> Self {
        AppError::Script(Box::new(value))
    }
}

pub(crate) fn parse_script(source: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fail = |detail: String| ScriptError {
            line: idx + 1,
            detail,
        };
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map(|(command, rest)| (command, rest.trim()))
            .unwrap_or((line, ""));

        match command {
            "role" | "tech" => {
                let (name, state) = rest
                    .rsplit_once(char::is_whitespace)
                    .ok_or_else(|| fail(format!("`{command}` expects <name> on|off")))?;
                let selected = parse_toggle(state)
                    .ok_or_else(|| fail(format!("expected on|off, found `{state}`")))?;
                let name = name.trim().to_string();
                steps.push(ScriptStep::Event(if command == "role" {
                    UiEvent::RoleToggled {
                        role: name,
                        selected,
                    }
                } else {
                    UiEvent::TechToggled {
                        tech: name,
                        selected,
                    }
                }));
            }
            "location" => steps.push(ScriptStep::Event(UiEvent::LocationChanged(
                rest.to_string(),
            ))),
            "experience" => steps.push(ScriptStep::Event(UiEvent::ExperienceChanged(
                rest.to_string(),
            ))),
            "sort" => steps.push(ScriptStep::Event(UiEvent::SortChanged(rest.to_string()))),
            "type" => {
                // One input event per keystroke, like a text box would fire.
                let mut typed = String::new();
                for (position, ch) in rest.chars().enumerate() {
                    if position > 0 {
                        steps.push(ScriptStep::Wait(KEYSTROKE_INTERVAL));
                    }
                    typed.push(ch);
                    steps.push(ScriptStep::Event(UiEvent::SearchInput(typed.clone())));
                }
                if rest.is_empty() {
                    steps.push(ScriptStep::Event(UiEvent::SearchInput(String::new())));
                }
            }
            "clear" => steps.push(ScriptStep::Event(UiEvent::ClearFilters)),
            "apply" if !rest.is_empty() => {
                steps.push(ScriptStep::Event(UiEvent::Apply(JobId::from(rest))))
            }
            "apply" => return Err(fail("`apply` expects a job id".to_string())),
            "load-more" => steps.push(ScriptStep::Event(UiEvent::LoadMore)),
            "wait" => {
                let millis = rest
                    .parse::<u64>()
                    .map_err(|_| fail(format!("`wait` expects milliseconds, found `{rest}`")))?;
                steps.push(ScriptStep::Wait(Duration::from_millis(millis)));
            }
            other => return Err(fail(format!("unknown command `{other}`"))),
        }
    }

    Ok(steps)
}

fn parse_toggle(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "checked" => Some(true),
        "off" | "false" | "unchecked" => Some(false),
        _ => None,
    }
}
