//! # firestock-core
//!
//! Core types, traits, and validators for the firestock inventory client.
//!
//! This crate holds everything that does no I/O: the error taxonomy, paging
//! state and response shapes, the endpoint/collaborator traits, the
//! assignment overlap validator, the tenant cell and the entity models.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod overlap;
pub mod pagination;
pub mod tenant;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{ApiError, Error, Result};
pub use models::*;
pub use overlap::{find_overlaps, has_overlap, AssignmentInterval};
pub use pagination::{
    clamp_page, normalize_search_term, ApiResponse, ListParams, ListState, PagedResponse,
};
pub use tenant::{clear_current_tenant, current_tenant, set_current_tenant};
pub use traits::*;
