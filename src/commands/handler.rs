use super::ChatState;
use crate::config::Config;
use crate::core::error::BankbotError;
use crate::display::format_transcript;
use crate::providers::Message;
use console::style;

pub trait CommandHandler: Send + Sync {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<Option<String>, BankbotError>;
    fn help(&self) -> &'static str;
}

pub struct QuitCommand;
pub struct HelpCommand;
pub struct ClearCommand;
pub struct HistoryCommand;
pub struct SaveTranscriptCommand;
pub struct LoadTranscriptCommand;
pub struct ListTranscriptsCommand;
pub struct DeleteTranscriptCommand;

impl CommandHandler for QuitCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, BankbotError> {
        state.should_continue = false;
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/quit - Exit the chat session"
    }
}

impl CommandHandler for HelpCommand {
    fn execute(
        &self,
        _state: &mut ChatState,
        _args: &[&str],
    ) -> Result<Option<String>, BankbotError> {
        let title = style("Available Commands").bold().underlined();
        let help_text = vec![
            title.to_string(),
            QuitCommand.help().to_string(),
            HelpCommand.help().to_string(),
            ClearCommand.help().to_string(),
            HistoryCommand.help().to_string(),
            SaveTranscriptCommand.help().to_string(),
            LoadTranscriptCommand.help().to_string(),
            ListTranscriptsCommand.help().to_string(),
            DeleteTranscriptCommand.help().to_string(),
        ]
        .join("\n");

        Ok(Some(help_text))
    }

    fn help(&self) -> &'static str {
        "/help - Show available commands"
    }
}

impl CommandHandler for ClearCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, BankbotError> {
        state.session.clear();
        Ok(Some("Conversation history cleared.".to_string()))
    }

    fn help(&self) -> &'static str {
        "/clear - Clear conversation history"
    }
}

impl CommandHandler for HistoryCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<Option<String>, BankbotError> {
        Ok(Some(format_transcript(state.session.history())))
    }

    fn help(&self) -> &'static str {
        "/history - Show the current conversation"
    }
}

impl CommandHandler for SaveTranscriptCommand {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<Option<String>, BankbotError> {
        let filename = if args.is_empty() {
            chrono::Local::now()
                .format("%Y%m%d_%H%M%S.json")
                .to_string()
        } else {
            args[0].to_string()
        };

        let history_dir = Config::history_dir();
        std::fs::create_dir_all(&history_dir)?;
        let path = history_dir.join(filename);

        let file = std::fs::File::create(&path)?;
        serde_json::to_writer_pretty(file, state.session.history())?;

        Ok(Some(format!("Transcript saved to: {}", path.display())))
    }

    fn help(&self) -> &'static str {
        "/save [filename] - Save the conversation to a file"
    }
}

impl CommandHandler for LoadTranscriptCommand {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<Option<String>, BankbotError> {
        if args.is_empty() {
            return Ok(Some("Please specify a filename".to_string()));
        }

        let path = Config::history_dir().join(args[0]);
        let file = std::fs::File::open(&path)?;
        let transcript: Vec<Message> = serde_json::from_reader(file)?;
        state.session.replace_transcript(transcript);

        let rendered = format_transcript(state.session.history());
        Ok(Some(format!(
            "{}\nTranscript loaded from: {}",
            rendered,
            path.display()
        )))
    }

    fn help(&self) -> &'static str {
        "/load <filename> - Restore a saved conversation"
    }
}

impl CommandHandler for ListTranscriptsCommand {
    fn execute(
        &self,
        _state: &mut ChatState,
        _args: &[&str],
    ) -> Result<Option<String>, BankbotError> {
        let history_dir = Config::history_dir();
        std::fs::create_dir_all(&history_dir)?;

        let mut files = Vec::new();
        for entry in std::fs::read_dir(history_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        files.sort();

        if files.is_empty() {
            Ok(Some("No saved transcripts found.".to_string()))
        } else {
            Ok(Some(files.join("\n")))
        }
    }

    fn help(&self) -> &'static str {
        "/list - List saved transcripts"
    }
}

impl CommandHandler for DeleteTranscriptCommand {
    fn execute(&self, _state: &mut ChatState, args: &[&str]) -> Result<Option<String>, BankbotError> {
        if args.is_empty() {
            return Ok(Some("Please specify a filename to delete".to_string()));
        }

        let path = Config::history_dir().join(args[0]);
        if !path.exists() {
            return Ok(Some(format!("File not found: {}", path.display())));
        }

        std::fs::remove_file(&path)?;
        Ok(Some(format!("Deleted transcript: {}", path.display())))
    }

    fn help(&self) -> &'static str {
        "/delete <filename> - Delete a saved transcript"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::BankbotError;
    use crate::core::session::ChatSession;
    use crate::providers::{ChatProvider, Message, Role};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct EchoProvider;

    #[async_trait]
    impl ChatProvider for EchoProvider {
        async fn complete(&self, messages: &[Message]) -> Result<String, BankbotError> {
            Ok(format!("echo: {}", messages.last().unwrap().content))
        }

        fn model(&self) -> &str {
            "echo-model"
        }
    }

    fn state_with_messages() -> ChatState {
        let mut state = ChatState::new(ChatSession::new(Arc::new(EchoProvider)));
        state.session.replace_transcript(vec![
            Message::user("What are your fees?"),
            Message::assistant("There are no monthly fees."),
        ]);
        state
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut state = state_with_messages();
        let output = QuitCommand.execute(&mut state, &[]).unwrap();

        assert!(output.is_none());
        assert!(!state.should_continue);
    }

    #[test]
    fn clear_empties_the_session() {
        let mut state = state_with_messages();
        ClearCommand.execute(&mut state, &[]).unwrap();

        assert!(state.session.history().is_empty());
        assert!(state.should_continue);
    }

    #[test]
    fn history_renders_both_roles() {
        let mut state = state_with_messages();
        let output = HistoryCommand.execute(&mut state, &[]).unwrap().unwrap();

        assert!(output.contains("What are your fees?"));
        assert!(output.contains("There are no monthly fees."));
    }

    #[test]
    fn history_on_empty_session_says_so() {
        let mut state = ChatState::new(ChatSession::new(Arc::new(EchoProvider)));
        let output = HistoryCommand.execute(&mut state, &[]).unwrap().unwrap();

        assert_eq!(output, "No messages yet.");
    }

    #[test]
    fn help_lists_every_command() {
        let mut state = state_with_messages();
        let output = HelpCommand.execute(&mut state, &[]).unwrap().unwrap();

        for name in [
            "/quit", "/help", "/clear", "/history", "/save", "/load", "/list", "/delete",
        ] {
            assert!(output.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn unknown_command_is_an_input_error() {
        let dispatcher = crate::commands::create_command_registry();
        let mut state = state_with_messages();

        let err = dispatcher.execute("frobnicate", &[], &mut state).unwrap_err();
        assert!(matches!(err, BankbotError::Input(_)));
    }

    #[test]
    fn transcript_roundtrips_through_serde() {
        let state = state_with_messages();
        let json = serde_json::to_string(state.session.history()).unwrap();
        let restored: Vec<Message> = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), 2);
        assert_eq!(restored[0].role, Role::User);
        assert_eq!(restored[1].role, Role::Assistant);
    }
}
