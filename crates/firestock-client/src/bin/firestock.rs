//! firestock: command-line client for the inventory backend.
//!
//! Drives the same list controller and envelopes a UI would use and prints
//! results as JSON on stdout. Logs go to stderr.
//!
//! Environment:
//!   FIRESTOCK_*  - client configuration (see `ClientConfig::from_env`)
//!   LOG_FORMAT   - "json" or "text" (default: "text")
//!   RUST_LOG     - standard env filter (default: "firestock=info")

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use serde_json::{json, Value as JsonValue};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use firestock_client::{
    entities, ClientConfig, Collaborators, ControllerOptions, HttpTransport, LoginRedirect,
    PaginatedListController, RestEndpoints, TracingNotifier,
};
use firestock_core::{set_current_tenant, ApiError};

/// Endpoints that pass entities through as raw JSON.
type JsonEndpoints = RestEndpoints<JsonValue, JsonValue>;

/// Exit code when the session was rejected and a login is required.
const EXIT_LOGIN_REQUIRED: u8 = 2;

#[derive(Parser)]
#[command(name = "firestock")]
#[command(author, version, about = "Inventory client for fire-service equipment")]
#[command(propagate_version = true)]
struct Cli {
    /// Tenant to act for
    #[arg(short, long, global = true, env = "FIRESTOCK_TENANT")]
    tenant: Option<String>,

    /// Config file (default: ~/.config/firestock/client.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Bearer token
    #[arg(long, global = true, env = "FIRESTOCK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of a collection
    List {
        /// Collection name (products, items, persons, item-assignments, ...)
        entity: String,

        /// Page to fetch, clamped to the available pages
        #[arg(short, long, default_value_t = 1)]
        page: i64,

        /// Items per page (default: configured page size)
        #[arg(short = 's', long)]
        page_size: Option<u32>,

        /// Server-side search filter
        #[arg(short = 'q', long)]
        search: Option<String>,
    },

    /// Create an entity from a JSON document
    Create {
        entity: String,

        /// JSON body
        #[arg(short, long)]
        data: String,
    },

    /// Update an entity from a JSON document
    Update {
        entity: String,
        id: String,

        /// JSON body
        #[arg(short, long)]
        data: String,
    },

    /// Delete an entity
    Delete { entity: String, id: String },

    /// Show the known collections
    Entities,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "firestock=info,firestock_client=info,firestock_core=info".into());
    let registry = tracing_subscriber::registry().with(env_filter);

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    if log_format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    if let Commands::Entities = cli.command {
        let names: Vec<&str> = entities::ALL_PATHS
            .iter()
            .map(|p| p.trim_start_matches('/'))
            .collect();
        print_json(&json!(names))?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = match cli.config {
        Some(ref path) => ClientConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ClientConfig::load().context("loading config")?,
    };
    if let Some(token) = cli.token {
        config.token = Some(token);
    }
    if let Some(tenant) = cli.tenant {
        set_current_tenant(tenant);
    }

    let page_size = config.page_size;
    let login = Arc::new(LoginRedirect::new(config.login_url.clone()));
    let collaborators = Collaborators::new(Arc::new(TracingNotifier), login.clone())
        .with_messages(config.messages.clone());
    let transport = Arc::new(HttpTransport::new(config)?);

    let session = Session {
        transport,
        collaborators,
        login,
    };

    match cli.command {
        Commands::List {
            entity,
            page,
            page_size: size,
            search,
        } => {
            let options = ControllerOptions::default().with_page_size(size.unwrap_or(page_size));
            let controller = session.controller(&entity, options)?;

            match search.as_deref() {
                Some(term) if !term.trim().is_empty() => controller.set_search_term(term).await,
                _ => {
                    controller.list().await;
                }
            }
            if page > 1 && controller.last_error().is_none() {
                controller.go_to_page(page).await;
            }

            if let Some(code) = session.failure(controller.last_error()) {
                return Ok(code);
            }

            let state = controller.state();
            print_json(&json!({
                "page": state.page,
                "pageSize": state.page_size,
                "totalItems": state.total_items,
                "totalPages": state.total_pages,
                "searchTerm": state.search_term,
                "items": controller.items(),
            }))?;
        }
        Commands::Create { entity, data } => {
            let body = parse_body(&data)?;
            let controller = session.controller(&entity, ControllerOptions::default())?;
            match controller.create(&body).await {
                Some(created) => print_json(&created)?,
                // success without a body prints null
                None => {
                    if let Some(code) = session.failure(controller.mutation_error()) {
                        return Ok(code);
                    }
                    print_json(&JsonValue::Null)?;
                }
            }
        }
        Commands::Update { entity, id, data } => {
            let body = parse_body(&data)?;
            let controller = session.controller(&entity, ControllerOptions::default())?;
            match controller.update(&id, &body).await {
                Some(updated) => print_json(&updated)?,
                // success without a body prints null
                None => {
                    if let Some(code) = session.failure(controller.mutation_error()) {
                        return Ok(code);
                    }
                    print_json(&JsonValue::Null)?;
                }
            }
        }
        Commands::Delete { entity, id } => {
            let controller = session.controller(&entity, ControllerOptions::default())?;
            if !controller.delete(&id).await {
                return Ok(session
                    .failure(controller.mutation_error())
                    .unwrap_or(ExitCode::FAILURE));
            }
            print_json(&json!({ "deleted": id }))?;
        }
        Commands::Entities => {}
    }

    Ok(ExitCode::SUCCESS)
}

struct Session {
    transport: Arc<HttpTransport>,
    collaborators: Collaborators,
    login: Arc<LoginRedirect>,
}

impl Session {
    fn controller(
        &self,
        entity: &str,
        options: ControllerOptions,
    ) -> anyhow::Result<PaginatedListController<JsonEndpoints>> {
        let path = entities::resolve_path(entity)
            .ok_or_else(|| anyhow!("unknown entity '{}' (try `firestock entities`)", entity))?;
        let endpoints = RestEndpoints::new(Arc::clone(&self.transport), path);
        Ok(PaginatedListController::new(
            Arc::new(endpoints),
            self.collaborators.clone(),
            options,
        ))
    }

    /// Exit code for a failed command, if it failed.
    fn failure(&self, error: Option<ApiError>) -> Option<ExitCode> {
        if let Some(url) = self.login.last_redirect() {
            eprintln!("Login required: {}", url);
            return Some(ExitCode::from(EXIT_LOGIN_REQUIRED));
        }
        let error = error?;
        eprintln!("Error: {}", error);
        Some(ExitCode::FAILURE)
    }
}

fn parse_body(data: &str) -> anyhow::Result<JsonValue> {
    serde_json::from_str(data).context("--data must be a JSON document")
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
