//! Two-level tag taxonomy.

pub mod model;
pub mod slug;

pub use model::{CreateTag, CreateTagCategory, Tag, TagCategory, TagDetail, UpdateTag, UpdateTagCategory};
pub use slug::{is_valid_slug, sluggify};
