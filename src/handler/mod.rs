//! # Handler Module
//!
//! The [`RouteHandler`] trait a handler implements to be mapped onto a route
//! table, a closure-backed [`ActionHandler`], and a name-keyed
//! [`HandlerRegistry`].

mod core;
mod registry;

pub use core::{ActionHandler, RouteHandler};
pub use registry::HandlerRegistry;
