//! Runtime template engine for the PAM stack templates.
//!
//! Templates are Tera files, one per [`StackName`](crate::StackName). They come
//! either from the copies embedded at build time or from a directory given at
//! runtime, and every rendered stack goes through the same line normalization.

mod engine;
mod loader;
mod normalize;

pub use engine::{RenderedStack, StackRenderer};
pub use loader::TemplateStore;
pub use normalize::normalize;
