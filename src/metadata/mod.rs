//! # Metadata Module
//!
//! Declarative metadata attached to handlers and the scanner that reads it.
//!
//! A handler declares an ordered list of [`MetadataTag`]s. Route intent is one
//! kind of tag ([`MetadataTag::Route`]); everything else (allowed methods,
//! authorization, descriptions, extensions) is opaque to registration and is
//! simply copied onto every endpoint the handler produces.
//!
//! ```rust
//! use brrtmap::metadata::{route_descriptors, HandlerMetadata, MetadataTag, RouteAttribute};
//!
//! let metadata = HandlerMetadata::new(vec![
//!     RouteAttribute::new("/pets").with_name("list_pets").into(),
//!     MetadataTag::Tags(vec!["pets".to_string()]),
//! ]);
//! let names: Vec<String> = route_descriptors(&metadata)
//!     .map(|d| d.display_name().to_string())
//!     .collect();
//! assert_eq!(names, vec!["list_pets"]);
//! ```

mod scan;
mod tag;

pub use scan::{route_descriptors, scan, ScanResult};
pub use tag::{EndpointMetadata, HandlerMetadata, MetadataTag, RouteAttribute, RouteDescriptor};
