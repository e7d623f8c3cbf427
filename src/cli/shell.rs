use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead, StdinLock},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;
use tracing::{debug, info};

use crate::cli::core::{CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::config::SETTING_KEYS;
use crate::errors::CliError;
use crate::utils::build_info;

const SCRIPT_ENV: &str = "INVOICE_CORE_CLI_SCRIPT";

const ROW_FIELDS: &[&str] = &["desc", "qty", "rate", "price"];
const DISCOUNT_KINDS: &[&str] = &["percent", "flat"];
const CONFIG_ACTIONS: &[&str] = &["show", "set"];
const JSON_TARGETS: &[&str] = &["form", "preview"];

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    info!(?mode, "invoice shell started");

    let outcome = match mode {
        CliMode::Interactive => {
            let mut source = PromptSource::new(context.command_names())?;
            output::info(build_info::current().summary());
            output::info("Type `help` to list commands. Totals update after every edit.");
            drive(&mut context, &mut source)
        }
        CliMode::Script => {
            let stdin = io::stdin();
            let mut source = ScriptSource {
                lines: stdin.lock(),
            };
            drive(&mut context, &mut source)
        }
    };
    debug!(status = %context.status(), "invoice shell stopped");
    outcome
}

/// Where the shell reads its next command from.
trait LineSource {
    /// `Ok(None)` ends the session.
    fn next_line(&mut self, context: &ShellContext) -> Result<Option<String>, CliError>;
}

struct PromptSource {
    editor: Editor<CommandHelper, DefaultHistory>,
}

impl PromptSource {
    fn new(names: Vec<&'static str>) -> Result<Self, CliError> {
        let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(CommandHelper::new(names)));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(Self { editor })
    }
}

impl LineSource for PromptSource {
    fn next_line(&mut self, context: &ShellContext) -> Result<Option<String>, CliError> {
        loop {
            match self.editor.readline(&context.prompt()) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    self.editor.add_history_entry(trimmed).ok();
                    return Ok(Some(trimmed.to_string()));
                }
                Err(ReadlineError::Interrupted) => {
                    if context.confirm_exit()? {
                        return Ok(None);
                    }
                }
                Err(ReadlineError::Eof) => {
                    output::info("Exiting shell.");
                    return Ok(None);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

struct ScriptSource<'a> {
    lines: StdinLock<'a>,
}

impl LineSource for ScriptSource<'_> {
    fn next_line(&mut self, _context: &ShellContext) -> Result<Option<String>, CliError> {
        let mut line = String::new();
        if self.lines.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

fn drive(context: &mut ShellContext, source: &mut dyn LineSource) -> Result<(), CliError> {
    while context.running {
        let Some(line) = source.next_line(context)? else {
            break;
        };
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&err.message);
            return Ok(LoopControl::Continue);
        }
    };

    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    if raw.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.last_command = Some(line.trim().to_string());

    let control = context.dispatch(&raw.to_lowercase(), raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

/// Completes command names, then the fixed keywords some commands take.
struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_string).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    fn keywords(words: &[&str]) -> &'static [&'static str] {
        match words {
            ["set", _] => ROW_FIELDS,
            ["discount", _] => DISCOUNT_KINDS,
            ["config"] => CONFIG_ACTIONS,
            ["config", "set"] => SETTING_KEYS,
            ["json"] => JSON_TARGETS,
            _ => &[],
        }
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
            .map(|index| index + 1)
            .unwrap_or(0);
        let needle = prefix[start..].to_ascii_lowercase();
        let before: Vec<&str> = prefix[..start].split_whitespace().collect();

        let pool: Vec<&str> = if before.is_empty() {
            self.commands.iter().map(String::as_str).collect()
        } else {
            Self::keywords(&before).to_vec()
        };

        let candidates = pool
            .into_iter()
            .filter(|word| word.starts_with(&needle))
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
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

impl Validator for CommandHelper {}

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

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens = parse_command_line("add-item 'Oak table' 1 900").expect("tokens");
        assert_eq!(tokens, vec!["add-item", "Oak table", "1", "900"]);
    }

    #[test]
    fn unbalanced_quotes_are_reported() {
        assert!(parse_command_line("customer 'Jane").is_err());
    }

    #[test]
    fn empty_quoted_argument_is_kept() {
        let tokens = parse_command_line("discount ''").expect("tokens");
        assert_eq!(tokens, vec!["discount", ""]);
    }

    #[test]
    fn keywords_follow_command_shape() {
        assert_eq!(CommandHelper::keywords(&["set", "2"]), ROW_FIELDS);
        assert_eq!(CommandHelper::keywords(&["config", "set"]), SETTING_KEYS);
        assert!(CommandHelper::keywords(&["set", "2", "qty"]).is_empty());
        assert!(CommandHelper::keywords(&["customer"]).is_empty());
    }
}
