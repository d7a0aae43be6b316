//! The rendering context handed to every stack template.

use tera::Context;

use crate::options::{PamModule, StackOptions};

pub const ENCRYPT_KEY: &str = "encrypt";
pub const MINIMAL_KEY: &str = "minimal";
pub const DEBUG_KEY: &str = "debug";
pub const NULLOK_KEY: &str = "nullok";

/// Flat, read-only mapping from template variable to value.
///
/// Every module key is a boolean. `encrypt`, `debug` and `nullok` are string
/// tokens, where the empty string is a valid value. `minimal` is a boolean.
/// The key set never varies between runs.
#[derive(Debug, Clone)]
pub struct RenderingContext {
    inner: Context,
}

impl RenderingContext {
    pub fn new(options: &StackOptions) -> Self {
        let mut inner = Context::new();
        for module in PamModule::ALL {
            inner.insert(module.context_key(), &options.is_enabled(module));
        }
        inner.insert(ENCRYPT_KEY, &options.encrypt);
        inner.insert(MINIMAL_KEY, &options.minimal);
        inner.insert(DEBUG_KEY, options.debug_token());
        inner.insert(NULLOK_KEY, options.nullok_token());
        Self { inner }
    }

    pub fn get(&self, key: &str) -> Option<&tera::Value> {
        self.inner.get(key)
    }

    pub(crate) fn as_tera(&self) -> &Context {
        &self.inner
    }
}

impl From<&StackOptions> for RenderingContext {
    fn from(options: &StackOptions) -> Self {
        Self::new(options)
    }
}
