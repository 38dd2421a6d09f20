use crate::commands::dispatcher::CommandDispatcher;
use crate::core::error::BankbotError;

use console::style;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, EditMode, Editor, Helper};
use std::path::{Path, PathBuf};

/// rustyline helper: completes slash commands, hints from input history.
pub struct ReplHelper {
    commands: Vec<String>,
    hinter: HistoryHinter,
}

impl ReplHelper {
    pub fn new(dispatcher: CommandDispatcher) -> Self {
        let mut commands = dispatcher.command_names();
        commands.sort();
        Self {
            commands,
            hinter: HistoryHinter {},
        }
    }
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if !line.starts_with('/') {
            return Ok((pos, Vec::new()));
        }

        let typed = &line[1..pos];
        let matches: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(typed))
            .map(|cmd| Pair {
                display: format!("/{}", cmd),
                replacement: cmd.clone(),
            })
            .collect();

        Ok((1, matches))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for ReplHelper {}

impl Validator for ReplHelper {}

impl Helper for ReplHelper {}

fn history_path() -> PathBuf {
    dirs::home_dir()
        .map(|mut path| {
            path.push(".bankbot/input_history.txt");
            path
        })
        .unwrap_or_else(|| Path::new(".bankbot/input_history.txt").to_path_buf())
}

/// Creates the configured line editor for the chat loop.
pub fn create_editor(
    dispatcher: CommandDispatcher,
) -> Result<Editor<ReplHelper, FileHistory>, BankbotError> {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut editor = Editor::with_config(config)
        .map_err(|e| BankbotError::Input(format!("failed to create line editor: {}", e)))?;
    editor.set_helper(Some(ReplHelper::new(dispatcher)));

    let _ = editor.load_history(&history_path());

    Ok(editor)
}

/// Read one line; None means the user asked to leave (Ctrl-C / Ctrl-D).
pub fn read_input(
    editor: &mut Editor<ReplHelper, FileHistory>,
) -> Result<Option<String>, BankbotError> {
    let prompt = style("You: ").bold().cyan().to_string();

    match editor.readline(&prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                editor
                    .add_history_entry(&line)
                    .map_err(|e| BankbotError::Input(format!("failed to record history: {}", e)))?;
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(BankbotError::Input(format!("input error: {}", err))),
    }
}

pub fn save_history(editor: &mut Editor<ReplHelper, FileHistory>) -> Result<(), BankbotError> {
    let path = history_path();
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    editor
        .save_history(&path)
        .map_err(|e| BankbotError::Input(format!("failed to save history: {}", e)))
}
