use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;

const SCRIPT_ENV: &str = "TCASH_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };
    if mode == CliMode::Script {
        output::set_plain(true);
    }

    let mut context = ShellContext::new(mode)?;
    context.report_load();

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    let helper = CommandHelper::new(context.command_names());
    editor.set_helper(Some(helper));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    output::info("Type `help` to list commands.");

    loop {
        if !context.running {
            break;
        }
        let prompt = context.prompt();
        let line = editor.readline(&prompt);

        match line {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                editor.add_history_entry(trimmed).ok();

                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(&err.message);
            return Ok(LoopControl::Continue);
        }
    };

    let Some(raw) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);

        // only the first word is a command name
        if !prefix[..start].trim().is_empty() {
            return Ok((start, Vec::new()));
        }

        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = self
            .commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::{FixedClock, LedgerStore};
    use crate::storage::TextStorage;
    use chrono::NaiveDate;
    use tempfile::{tempdir, TempDir};

    fn script_context() -> (ShellContext, TempDir) {
        let temp = tempdir().unwrap();
        let storage = TextStorage::new(temp.path().join("records")).unwrap();
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        let store = LedgerStore::load(Box::new(storage), Box::new(clock)).unwrap();
        (
            ShellContext::with_store(CliMode::Script, store, Config::default()),
            temp,
        )
    }

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens = parse_command_line(r#"delete 2024-07-01 "Rice and eggs" -120.00"#).unwrap();
        assert_eq!(tokens, ["delete", "2024-07-01", "Rice and eggs", "-120.00"]);
        assert!(parse_command_line("add in 5 \"unterminated").is_err());
    }

    #[test]
    fn add_then_delete_by_values() {
        let (mut context, _guard) = script_context();
        handle_line(&mut context, "add out 120 Rice and eggs").unwrap();
        assert_eq!(context.store().records().len(), 1);
        assert_eq!(context.store().records()[0].description(), "Rice and eggs");

        handle_line(&mut context, r#"delete 2024-07-01 "Rice and eggs" -120.00"#).unwrap();
        assert!(context.store().records().is_empty());
    }

    #[test]
    fn delete_by_number() {
        let (mut context, _guard) = script_context();
        handle_line(&mut context, "add in 50 Allowance").unwrap();
        handle_line(&mut context, "add out 10 Candy").unwrap();
        handle_line(&mut context, "delete 1").unwrap();
        let left: Vec<_> = context
            .store()
            .records()
            .iter()
            .map(|r| r.description().to_string())
            .collect();
        assert_eq!(left, ["Candy"]);

        let err = handle_line(&mut context, "delete 9").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn aliases_reach_the_same_handlers() {
        let (mut context, _guard) = script_context();
        handle_line(&mut context, "add out 4 Bread").unwrap();
        handle_line(&mut context, "ls").unwrap();
        handle_line(&mut context, "RM 1").unwrap();
        assert!(context.store().records().is_empty());
        assert_eq!(handle_line(&mut context, "quit").unwrap(), LoopControl::Exit);
    }

    #[test]
    fn bad_delete_arguments_report_every_form() {
        let (mut context, _guard) = script_context();
        let err = handle_line(&mut context, "delete 2024-07-01 Bread").unwrap_err();
        let CommandError::InvalidArguments(message) = err else {
            panic!("expected usage error, got {err:?}");
        };
        assert_eq!(
            message,
            "Usage: delete <number> | delete <date> <description> <amount>"
        );
    }

    #[test]
    fn validation_errors_surface_as_core_errors() {
        let (mut context, _guard) = script_context();
        let err = handle_line(&mut context, "add in zero Gift").unwrap_err();
        assert!(matches!(err, CommandError::Core(ref e) if e.is_validation()));
        assert!(context.report_error(err).is_ok());
        assert!(context.store().records().is_empty());
    }

    #[test]
    fn exit_stops_the_loop_and_unknown_commands_continue() {
        let (mut context, _guard) = script_context();
        assert_eq!(
            handle_line(&mut context, "sumary").unwrap(),
            LoopControl::Continue
        );
        assert_eq!(handle_line(&mut context, "EXIT").unwrap(), LoopControl::Exit);
        assert!(!context.running);
    }
}
