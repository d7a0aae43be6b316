//! Gentoo-style PAM stack generator.
//!
//! Turns a set of [`StackOptions`] into the nine PAM service files
//! (`system-auth`, `system-login`, `su`, ...) by rendering Tera templates and
//! normalizing the result.
//!
//! # Modules
//!
//! - [`options`] — optional modules, password hash and global toggles
//! - [`context`] — the flat rendering context built from the options
//! - [`stack`] — the nine stack names
//! - [`template_engine`] — template stores, Tera rendering, line normalization
//! - [`generator`] — output directory handling and writing the stacks
//!
//! ```no_run
//! use pambase::{generate, PamModule, StackOptions, TemplateStore};
//! use std::path::Path;
//!
//! let options = StackOptions::default().with_module(PamModule::Pwquality);
//! let report = generate(&options, &TemplateStore::Builtin, Path::new("stack"))?;
//! assert_eq!(report.written().count(), 9);
//! # Ok::<(), pambase::PambaseError>(())
//! ```

pub mod context;
pub mod error;
pub mod generator;
pub mod options;
pub mod stack;
pub mod template_engine;

pub use context::RenderingContext;
pub use error::{PambaseError, PambaseResult};
pub use generator::{
    generate, prepare_output_dir, render_stacks, write_stacks, GenerationReport, StackOutcome,
    DEFAULT_OUTPUT_DIR,
};
pub use options::{HashAlgorithm, PamModule, StackOptions};
pub use stack::StackName;
pub use template_engine::{normalize, RenderedStack, StackRenderer, TemplateStore};
