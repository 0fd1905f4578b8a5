//! Citation expansion services.
//!
//! Resolution, splicing and the processor that ties them together over a
//! document.

pub mod processor;
pub mod resolver;
pub mod splice;
