use bankbot::app::Application;
use bankbot::cli::{Cli, Command};
use bankbot::commands::create_command_registry;
use bankbot::config::Config;
use bankbot::core::error::BankbotError;
use bankbot::providers::ChatProvider;
use bankbot::providers::mistral::MistralProvider;
use bankbot::{dashboard, web};
use clap::Parser;
use console::style;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run().await {
        eprintln!("{} {}", style("error:").bold().red(), err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BankbotError> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    config.apply_overrides(cli.model, cli.base_url);

    // A missing credential stops every front end before it starts.
    let api_key = config.api_key()?.to_string();
    let provider: Arc<dyn ChatProvider> = Arc::new(MistralProvider::with_endpoint(
        config.base_url.clone(),
        api_key,
        config.model.clone(),
    )?);

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => {
            Application::new(provider, create_command_registry())
                .run()
                .await
        }
        Command::Ask { question } => {
            Application::new(provider, create_command_registry())
                .ask(question)
                .await
        }
        Command::Serve { host, port } => {
            let host = host.unwrap_or(config.host);
            let port = port.unwrap_or(config.port);
            web::run(provider, &host, port).await
        }
        Command::Dashboard => dashboard::run(provider).await,
    }
}
