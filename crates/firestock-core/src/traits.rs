//! Core traits for firestock abstractions.
//!
//! These traits are the seams between the list controller and the outside
//! world: the backend endpoints, the toast layer and the identity provider.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::pagination::{ApiResponse, ListParams, PagedResponse};

// =============================================================================
// ENDPOINTS
// =============================================================================

/// The four server operations of one entity collection.
///
/// `Err` means the call produced no response at all (network failure,
/// undecodable body). A response with an error status is `Ok` and is
/// classified by the caller.
#[async_trait]
pub trait CrudEndpoints: Send + Sync {
    /// Entity returned by the server.
    type Item: Clone + Send + Sync + 'static;
    /// Body sent on create.
    type Create: Send + Sync;
    /// Body sent on update.
    type Update: Send + Sync;

    /// Collection path for logging, e.g. "/products".
    fn name(&self) -> &str;

    /// Fetch one page.
    async fn list(&self, params: &ListParams) -> Result<ApiResponse<PagedResponse<Self::Item>>>;

    /// Create an entity. The payload is `None` when the server sent no body.
    async fn create(&self, body: &Self::Create) -> Result<ApiResponse<Option<Self::Item>>>;

    /// Update the entity with `id`.
    async fn update(&self, id: &str, body: &Self::Update)
        -> Result<ApiResponse<Option<Self::Item>>>;

    /// Delete the entity with `id`. Many endpoints answer with no body.
    async fn delete(&self, id: &str) -> Result<ApiResponse<Option<JsonValue>>>;
}

// =============================================================================
// COLLABORATORS
// =============================================================================

/// Transient user notifications (toasts).
pub trait Notifier: Send + Sync {
    fn notify_success(&self, message: &str);

    fn notify_error(&self, title: &str, description: &str);
}

/// External identity provider used when the session is no longer valid.
pub trait IdentityProvider: Send + Sync {
    /// Location to come back to after logging in.
    fn current_location(&self) -> String {
        crate::defaults::RETURN_LOCATION.to_string()
    }

    /// Start the login flow.
    fn redirect_to_login(&self, return_url: &str);
}
