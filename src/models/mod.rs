//! Data models for rtemplate.
//!
//! Typed values and the binding context they live in.

mod context;
mod value;

pub use context::{Context, DataFormat};
pub use value::Value;
