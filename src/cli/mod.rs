//! CLI command implementations
//!
//! - `validate`: completeness and uniqueness check
//! - `expand`: wildcard expansion listing
//! - `schema`: JSON schemas
//! - `util`: shared argument helpers

pub mod expand;
pub mod schema;
pub mod util;
pub mod validate;

pub use expand::cmd_expand;
pub use schema::cmd_schema;
pub use validate::cmd_validate;
