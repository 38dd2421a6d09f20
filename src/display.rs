use crate::core::error::BankbotError;
use crate::providers::{Message, Role};
use crate::utils::text::wrap_text;
use console::style;

fn content_width() -> usize {
    let term = console::Term::stdout();
    let terminal_width = term.size().1 as usize;
    std::cmp::min(terminal_width.saturating_sub(4), 100).max(40)
}

/// Welcome banner for the interactive loop.
pub fn display_welcome(model: &str) {
    let width = content_width();
    let rule = "═".repeat(width);

    println!("\n{}", style(&rule).dim());
    println!("{}", style("Welcome to Banking Bot").bold().cyan());
    println!("{}", style(format!("Powered by {}", model)).dim());
    println!();
    println!("I'm here to help with your banking needs.");
    println!(
        "Type {} for commands, {} to quit.",
        style("/help").bold(),
        style("/quit").bold()
    );
    println!("{}\n", style(&rule).dim());
}

fn looks_like_markdown(text: &str) -> bool {
    text.contains("```") || text.contains('*') || text.contains('`') || text.contains('#')
}

/// Print an assistant reply; markdown-looking replies go through termimad.
pub fn display_reply(reply: &str) {
    println!("\n{}", style("Bot:").bold().green());
    if looks_like_markdown(reply) {
        let skin = termimad::MadSkin::default();
        skin.print_text(reply);
    } else {
        for line in wrap_text(reply, content_width()) {
            println!("{}", line);
        }
    }
    println!();
}

pub fn display_error(err: &BankbotError) {
    eprintln!("{} {}", style("error:").bold().red(), err);
}

/// Render a transcript the way the /history and /load commands show it.
pub fn format_transcript(messages: &[Message]) -> String {
    if messages.is_empty() {
        return "No messages yet.".to_string();
    }

    messages
        .iter()
        .map(|message| {
            let label = match message.role {
                Role::System => style("System:").bold().yellow(),
                Role::User => style("You:").bold().cyan(),
                Role::Assistant => style("Bot:").bold().green(),
            };
            format!("{} {}", label, message.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
