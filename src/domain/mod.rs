//! Domain types shared by every layer.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Error taxonomy** ([`PhenomlError`], [`ApiError`]) and process exit codes
//! - **Result type alias** ([`Result`])
//! - **Strongly-typed identifiers** ([`ProviderId`], [`WorkflowId`])
//!
//! # Error Handling
//!
//! ```rust
//! use phenoml_workflow::domain::{PhenomlError, Result};
//!
//! fn require_name(name: Option<&str>) -> Result<&str> {
//!     name.ok_or_else(|| {
//!         PhenomlError::configuration("WORKFLOW_NAME", "Set WORKFLOW_NAME in .env, or use --name")
//!     })
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod result;

pub use errors::{exit_codes, ApiError, PhenomlError};
pub use ids::{ProviderId, WorkflowId};
pub use result::Result;
