//! Amigo secreto server binary.
//!
//! # Usage
//!
//! ```bash
//! # Register a group
//! amigo-secreto register natal Ana Bruno Caio
//!
//! # Serve requests, links point at the given public URL
//! amigo-secreto serve --bind 0.0.0.0:8080 --base-url https://amigo.example
//! ```

use std::{collections::HashMap, sync::Arc};

use amigo_secreto::{
    config::{Cli, Command, ServeArgs},
    render::Pages,
    router::{Request, Router},
    service::{seed::RandomSeed, storage::json_file::JsonFileStorage, Service},
};
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::IntoResponse,
    routing::get,
};
use clap::Parser;

type AppRouter = Router<JsonFileStorage, RandomSeed, Pages>;

struct AppState {
    router: AppRouter,
    args: ServeArgs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err.into());
        }
    }
    pretty_env_logger::init();

    let cli = Cli::parse();
    let storage = JsonFileStorage::new(&cli.table);
    log::info!("using table {}", storage.path().display());

    let service = Service::new(storage, RandomSeed);

    match cli.command {
        Command::Register(args) => {
            let group = service.register(&args.group, args.participants).await?;
            log::info!("group {} registered: {:?}", group.id, group.participants);
        }
        Command::Serve(args) => serve(service, args).await?,
    }

    Ok(())
}

async fn serve(
    service: Service<JsonFileStorage, RandomSeed>,
    args: ServeArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let bind = args.bind.clone();
    let state = Arc::new(AppState {
        router: Router::new(service, Pages),
        args,
    });

    let app = axum::Router::new()
        .route("/", get(handle))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    log::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn handle(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok());

    let request = Request {
        params,
        base_url: state.args.base_url_for(host),
    };
    let response = state.router.handle(&request).await;

    (
        response.status,
        [(header::CONTENT_TYPE, response.content_type)],
        response.body,
    )
}
