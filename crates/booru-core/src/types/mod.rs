//! Core type definitions shared by list endpoints.

pub mod pagination;
pub mod sorting;

pub use pagination::{Page, PageMeta, PageQuery, PageWindow};
pub use sorting::{SortDirection, SortField};
