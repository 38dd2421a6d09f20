use crate::core::session::ChatSession;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Conversation starters offered while the transcript is empty, mirroring the
/// quick-action buttons of the original web dashboard.
pub const QUICK_ACTIONS: &[(&str, &str)] = &[
    ("Open an account", "How do I open a new account?"),
    ("Transfer money", "How do I transfer money?"),
    ("Loan info", "What loan options do you offer?"),
    ("Fees & charges", "What are your fees?"),
];

pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Thinking,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DashboardAction {
    Submit(String),
    Clear,
    Quit,
}

pub struct DashboardApp {
    pub session: ChatSession,
    pub input: String,
    pub status: Status,
    pub scroll: u16,
    pub stick_to_bottom: bool,
    pub last_error: Option<String>,
    pub spinner_frame: usize,
}

impl DashboardApp {
    pub fn new(session: ChatSession) -> Self {
        Self {
            session,
            input: String::new(),
            status: Status::Idle,
            scroll: 0,
            stick_to_bottom: true,
            last_error: None,
            spinner_frame: 0,
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    pub fn tick(&mut self) {
        if self.status == Status::Thinking {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    /// Translate a key press into an action. Returns None for pure state
    /// updates (editing, scrolling).
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DashboardAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(DashboardAction::Quit),
                KeyCode::Char('l') => Some(DashboardAction::Clear),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Esc => Some(DashboardAction::Quit),
            KeyCode::Enter => {
                let message = self.input.trim().to_string();
                if message.is_empty() || self.status == Status::Thinking {
                    None
                } else {
                    self.input.clear();
                    Some(DashboardAction::Submit(message))
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::PageUp => {
                self.stick_to_bottom = false;
                self.scroll = self.scroll.saturating_sub(5);
                None
            }
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(5);
                None
            }
            KeyCode::F(n) if self.session.history().is_empty() => {
                let index = (n as usize).checked_sub(1)?;
                QUICK_ACTIONS
                    .get(index)
                    .map(|(_, prompt)| DashboardAction::Submit(prompt.to_string()))
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::BankbotError;
    use crate::providers::{ChatProvider, Message};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct NullProvider;

    #[async_trait]
    impl ChatProvider for NullProvider {
        async fn complete(&self, _messages: &[Message]) -> Result<String, BankbotError> {
            Ok("ok".to_string())
        }

        fn model(&self) -> &str {
            "null-model"
        }
    }

    fn app() -> DashboardApp {
        DashboardApp::new(ChatSession::new(Arc::new(NullProvider)))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typing_builds_the_input_line() {
        let mut app = app();
        for c in "fees?".chars() {
            assert!(app.handle_key(press(KeyCode::Char(c))).is_none());
        }
        assert_eq!(app.input, "fees?");

        app.handle_key(press(KeyCode::Backspace));
        assert_eq!(app.input, "fees");
    }

    #[test]
    fn enter_submits_and_clears_the_input() {
        let mut app = app();
        for c in "hello".chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }

        let action = app.handle_key(press(KeyCode::Enter));
        assert_eq!(action, Some(DashboardAction::Submit("hello".to_string())));
        assert!(app.input.is_empty());
    }

    #[test]
    fn enter_on_empty_input_does_nothing() {
        let mut app = app();
        assert!(app.handle_key(press(KeyCode::Enter)).is_none());
    }

    #[test]
    fn enter_is_ignored_while_thinking() {
        let mut app = app();
        app.input.push_str("pending");
        app.status = Status::Thinking;
        assert!(app.handle_key(press(KeyCode::Enter)).is_none());
    }

    #[test]
    fn control_bindings_quit_and_clear() {
        let mut app = app();
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(DashboardAction::Quit)
        );
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL)),
            Some(DashboardAction::Clear)
        );
        assert_eq!(app.handle_key(press(KeyCode::Esc)), Some(DashboardAction::Quit));
    }

    #[test]
    fn function_keys_fire_quick_actions_only_on_an_empty_transcript() {
        let mut app = app();
        let action = app.handle_key(press(KeyCode::F(1)));
        assert_eq!(
            action,
            Some(DashboardAction::Submit(
                "How do I open a new account?".to_string()
            ))
        );

        app.session.replace_transcript(vec![Message::user("hi")]);
        assert!(app.handle_key(press(KeyCode::F(1))).is_none());
    }
}
