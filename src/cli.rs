use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bankbot", version, about = "Banking assistant powered by Mistral")]
pub struct Cli {
    /// Model to use (overrides config file)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Completion endpoint base URL (overrides config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat in the terminal (default)
    Chat,
    /// Ask a single question and exit; reads piped stdin as extra context
    Ask {
        /// The question to ask
        question: Option<String>,
    },
    /// Run the HTTP API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,
        /// Bind port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Full-screen dashboard interface
    Dashboard,
}
