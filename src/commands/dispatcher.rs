use super::{
    ChatState,
    handler::{
        ClearCommand, DeleteTranscriptCommand, HelpCommand, HistoryCommand, ListTranscriptsCommand,
        LoadTranscriptCommand, QuitCommand, SaveTranscriptCommand,
    },
    registry::CommandRegistry,
};
use crate::core::error::BankbotError;
use std::sync::Arc;

#[derive(Clone)]
pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
}

impl CommandDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub fn execute(
        &self,
        command: &str,
        args: &[&str],
        state: &mut ChatState,
    ) -> Result<Option<String>, BankbotError> {
        self.registry.execute(command, args, state)
    }

    pub fn command_names(&self) -> Vec<String> {
        self.registry.command_names()
    }
}

pub fn create_command_registry() -> CommandDispatcher {
    let mut registry = CommandRegistry::new();

    registry.register("quit", QuitCommand);
    registry.register("help", HelpCommand);
    registry.register("clear", ClearCommand);
    registry.register("history", HistoryCommand);
    registry.register("save", SaveTranscriptCommand);
    registry.register("load", LoadTranscriptCommand);
    registry.register("list", ListTranscriptsCommand);
    registry.register("delete", DeleteTranscriptCommand);

    CommandDispatcher::new(Arc::new(registry))
}
