pub mod handlers;
pub mod state;

use crate::core::error::BankbotError;
use crate::providers::ChatProvider;
use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use state::AppState;
use std::sync::Arc;

/// Run the HTTP API front end until interrupted.
pub async fn run(
    provider: Arc<dyn ChatProvider>,
    host: &str,
    port: u16,
) -> Result<(), BankbotError> {
    let app_state = web::Data::new(AppState::new(provider));

    log::info!("serving chat API on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Cors::permissive())
            .configure(handlers::api_config)
    })
    .bind((host, port))?
    .run()
    .await?;

    Ok(())
}
