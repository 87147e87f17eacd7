//! Entity to model mappers
//!
//! This module provides conversions between domain entities (blog-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert`/`*Update` structs: Prepare entity data for database operations
//! - `SubjectTables`: table and column names for a reactable subject kind

mod blog;
mod comment;
mod reaction;

pub use blog::{BlogInsert, BlogUpdate};
pub use comment::CommentInsert;
pub use reaction::{reaction_from_model, SubjectTables};
