//! Tera-based rendering of the stack templates.

use tera::Tera;

use super::loader::TemplateStore;
use super::normalize::normalize;
use crate::context::RenderingContext;
use crate::error::{PambaseError, PambaseResult};
use crate::stack::StackName;

/// Template engine holding all nine stack templates.
#[derive(Debug)]
pub struct StackRenderer {
    tera: Tera,
}

/// A stack after rendering and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedStack {
    pub name: StackName,
    /// Normalized text without the trailing newline.
    pub content: String,
}

impl RenderedStack {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Bytes to write to disk, or `None` when the stack rendered to nothing.
    pub fn file_contents(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(format!("{}\n", self.content))
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }
}

impl StackRenderer {
    /// Load and compile every stack template from `store`.
    ///
    /// Fails on the first template that is missing or does not parse.
    pub fn load(store: &TemplateStore) -> PambaseResult<Self> {
        let mut tera = Tera::default();
        // PAM files are plain text, never escape substitutions.
        tera.autoescape_on(vec![]);

        for stack in StackName::ALL {
            let source = store.load(stack)?;
            tera.add_raw_template(stack.as_str(), &source)
                .map_err(|e| PambaseError::template(stack.as_str(), e))?;
        }

        tracing::debug!(store = %store, "Loaded stack templates");
        Ok(Self { tera })
    }

    /// Render and normalize a single stack.
    pub fn render(
        &self,
        stack: StackName,
        context: &RenderingContext,
    ) -> PambaseResult<RenderedStack> {
        let rendered = self
            .tera
            .render(stack.as_str(), context.as_tera())
            .map_err(|e| PambaseError::template(stack.as_str(), e))?;

        let content = normalize(&rendered);
        tracing::debug!(
            stack = %stack,
            lines = content.lines().count(),
            "Rendered stack"
        );
        Ok(RenderedStack {
            name: stack,
            content,
        })
    }

    /// Render every stack in [`StackName::ALL`] order.
    pub fn render_all(&self, context: &RenderingContext) -> PambaseResult<Vec<RenderedStack>> {
        StackName::ALL
            .into_iter()
            .map(|stack| self.render(stack, context))
            .collect()
    }
}
