//! Tree scanning
//!
//! Walks a directory tree, orders the files it finds and digests their
//! content. The stages are independent so the builder can run them in
//! sequence or digest in parallel without affecting output order.

pub mod builder;
pub mod hasher;
pub mod order;
pub mod path;
pub mod walker;
