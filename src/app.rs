use crate::commands::{ChatState, dispatcher::CommandDispatcher};
use crate::core::error::BankbotError;
use crate::core::session::ChatSession;
use crate::display;
use crate::input;
use crate::providers::ChatProvider;
use is_terminal::IsTerminal;
use std::io::{self, Read};
use std::sync::Arc;

/// The terminal front end: an interactive loop or a one-shot question.
pub struct Application {
    provider: Arc<dyn ChatProvider>,
    dispatcher: CommandDispatcher,
}

impl Application {
    pub fn new(provider: Arc<dyn ChatProvider>, dispatcher: CommandDispatcher) -> Self {
        Self {
            provider,
            dispatcher,
        }
    }

    /// Read everything from a piped stdin, if there is one.
    pub fn piped_stdin() -> Result<Option<String>, BankbotError> {
        if io::stdin().is_terminal() {
            return Ok(None);
        }

        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| BankbotError::Input(format!("failed to read from stdin: {}", e)))?;

        let trimmed = buffer.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    /// One question, one answer, exit. Piped stdin becomes the question, or
    /// extra context when a question argument is present as well.
    pub async fn ask(&self, question: Option<String>) -> Result<(), BankbotError> {
        let piped = Self::piped_stdin()?;
        let question = match (question, piped) {
            (Some(q), Some(ctx)) => format!("{}\n\n{}", q, ctx),
            (Some(q), None) => q,
            (None, Some(ctx)) => ctx,
            (None, None) => {
                return Err(BankbotError::Input("no question provided".to_string()));
            }
        };

        let mut session = ChatSession::new(self.provider.clone());
        let reply = session.send(&question).await?;
        display::display_reply(&reply);

        Ok(())
    }

    /// The interactive chat loop.
    pub async fn run(&self) -> Result<(), BankbotError> {
        // A piped invocation gets a single answer instead of a dead REPL.
        if !io::stdin().is_terminal() {
            return self.ask(None).await;
        }

        display::display_welcome(self.provider.model());

        let mut state = ChatState::new(ChatSession::new(self.provider.clone()));
        let mut editor = input::create_editor(self.dispatcher.clone())?;

        loop {
            let line = match input::read_input(&mut editor)? {
                Some(line) => line.trim().to_string(),
                None => break,
            };

            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix('/') {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                if let Some((command, args)) = parts.split_first() {
                    match self.dispatcher.execute(command, args, &mut state) {
                        Ok(Some(output)) => println!("{}", output),
                        Ok(None) => {}
                        Err(err) => display::display_error(&err),
                    }

                    if !state.should_continue {
                        break;
                    }
                }
                continue;
            }

            match state.session.send(&line).await {
                Ok(reply) => display::display_reply(&reply),
                Err(err) => {
                    // The transcript keeps the user message; the next send
                    // will carry it again.
                    log::error!("completion failed: {}", err);
                    display::display_error(&err);
                }
            }
        }

        input::save_history(&mut editor)?;
        println!("Thank you for using Banking Bot. Goodbye!");

        Ok(())
    }
}
