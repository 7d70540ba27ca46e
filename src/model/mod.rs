//! Core data types for the patch catalog.
//!
//! - [`Catalog`] - the top-level envelope, products in document order
//! - [`Product`] - a version label and its patches
//! - [`Patch`] - one vendor patch entry
//! - [`PatchDate`] / [`CriticalFlag`] - coerced fields with verbatim fallback
//! - [`Checksum`] - a `filename:digest` record
//!
//! All entities are immutable value records: they are built once by
//! [`parse_catalog`] and never mutated afterwards.
//!
//! # Example
//!
//! ```
//! use patchcat::model::parse_catalog;
//!
//! let catalog = parse_catalog(r#"{"Product": []}"#).unwrap();
//! assert!(catalog.products.is_empty());
//! ```

mod catalog;

pub use catalog::*;
