pub mod dispatcher;
pub mod handler;
pub mod registry;

use crate::core::session::ChatSession;
pub use dispatcher::create_command_registry;

/// Mutable state the slash commands operate on: the conversation session plus
/// the loop-control flag.
pub struct ChatState {
    pub session: ChatSession,
    pub should_continue: bool,
}

impl ChatState {
    pub fn new(session: ChatSession) -> Self {
        Self {
            session,
            should_continue: true,
        }
    }
}
