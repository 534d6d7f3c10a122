// crates/query-filter/src/lib.rs
// ============================================================================
// Module: Query Filter Library
// Description: Public API surface for query template validation.
// Purpose: Expose the syntax gate, placeholder matcher, and substitution engine.
// Dependencies: crate::{error, syntax, template}
// ============================================================================

//! ## Overview
//! Query Filter resolves user-authored SQL templates with `{name}`
//! placeholders against JSON filter definition maps. It enforces a static
//! syntax gate, a placeholder/filter bijection, per-descriptor shape rules,
//! and performs deterministic, semantically neutral substitution. The crate is
//! pure and stateless; it never talks to an execution backend.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod syntax;
pub mod template;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::QueryFilterError;
pub use syntax::check_syntax;
pub use template::FilterDescriptor;
pub use template::FilterMap;
pub use template::FilterType;
pub use template::RunnableQueryOptions;
pub use template::convert_to_datalake_v3;
pub use template::extract_placeholders;
pub use template::runnable_query;
pub use template::substitute;
