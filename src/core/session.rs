use crate::core::error::BankbotError;
use crate::providers::{ChatProvider, Message};
use std::sync::Arc;

/// Directive prepended to every outbound request. Never stored in the
/// transcript and never shown to the user.
pub const BANKING_SYSTEM_PROMPT: &str = "\
You are a friendly, professional banking assistant. Your goal is to help \
customers with their banking needs in a clear, conversational manner.

You can help with:
- Account questions (savings, checking, credit cards)
- Money transfers and payments
- Loan and credit information
- Banking products and services
- General financial questions

Guidelines:
1. Keep responses concise and easy to understand (2-3 sentences)
2. Use simple language, avoid jargon
3. For sensitive matters, recommend secure verification
4. Never ask for passwords or PIN numbers
5. Be warm and helpful while maintaining professionalism
6. Format responses clearly without excessive formatting marks
7. Always be ready to escalate to a human agent if needed

Remember: You're here to make banking easier and more pleasant!";

/// One conversation with the assistant.
///
/// Owns the ordered transcript of exchanged messages and assembles each
/// outbound request as `[system instruction] + transcript`. A session is used
/// by one caller at a time; it holds no lock and performs no retry.
pub struct ChatSession {
    provider: Arc<dyn ChatProvider>,
    system_prompt: String,
    transcript: Vec<Message>,
}

impl ChatSession {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self::with_system_prompt(provider, BANKING_SYSTEM_PROMPT)
    }

    pub fn with_system_prompt(
        provider: Arc<dyn ChatProvider>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            system_prompt: system_prompt.into(),
            transcript: Vec::new(),
        }
    }

    /// Send one user message and return the assistant's reply.
    ///
    /// The user message is appended to the transcript before the provider is
    /// called and stays there even when the call fails; only a successful call
    /// records an assistant message. Callers render the error at their own
    /// boundary.
    pub async fn send(&mut self, user_message: &str) -> Result<String, BankbotError> {
        self.transcript.push(Message::user(user_message));

        let mut request = Vec::with_capacity(self.transcript.len() + 1);
        request.push(Message::system(self.system_prompt.clone()));
        request.extend(self.transcript.iter().cloned());

        let reply = self.provider.complete(&request).await?;

        self.transcript.push(Message::assistant(reply.clone()));
        Ok(reply)
    }

    /// Read-only view of the transcript, in conversation order.
    pub fn history(&self) -> &[Message] {
        &self.transcript
    }

    /// Drop the transcript; the system instruction is unaffected.
    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    /// Replace the transcript wholesale, e.g. when restoring a saved one.
    pub fn replace_transcript(&mut self, transcript: Vec<Message>) {
        self.transcript = transcript;
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }
}
