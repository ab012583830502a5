//! # firestock-client
//!
//! Client-side core of the firestock inventory application.
//!
//! This crate provides:
//! - Request envelope normalizing every server call into success, error or
//!   login redirect
//! - Paginated list controller with search, paging and refetch-after-mutation
//! - Search debouncer for keystroke-driven filters
//! - reqwest transport and REST endpoint bindings for each entity family
//! - Notifiers (tracing, broadcast) and the login redirect identity provider
//! - Configuration loading from TOML or environment
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use firestock_client::{
//!     entities, Collaborators, ControllerOptions, HttpTransport, LoginRedirect,
//!     PaginatedListController, TracingNotifier,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = Arc::new(HttpTransport::from_env().unwrap());
//!     let collaborators = Collaborators::new(
//!         Arc::new(TracingNotifier),
//!         Arc::new(LoginRedirect::new(transport.config().login_url.clone())),
//!     );
//!     let products = PaginatedListController::mount(
//!         Arc::new(entities::products(transport)),
//!         collaborators,
//!         ControllerOptions::default(),
//!     )
//!     .await;
//!     products.set_search_term("helmet").await;
//!     println!("{} products", products.state().total_items);
//! }
//! ```

pub mod auth;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod endpoints;
pub mod entities;
pub mod envelope;
pub mod notify;
pub mod transport;

// Scripted endpoints and recording collaborators for testing
#[cfg(test)]
pub mod mock;

pub use auth::LoginRedirect;
pub use config::{ClientConfig, ConfigError, Messages};
pub use controller::{ControllerOptions, PaginatedListController};
pub use debounce::SearchDebouncer;
pub use endpoints::RestEndpoints;
pub use envelope::{Collaborators, NotifyOptions, RequestEnvelope};
pub use notify::{BroadcastNotifier, Notification, TracingNotifier};
pub use transport::HttpTransport;
