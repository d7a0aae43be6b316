//! Rendering a full set of stacks and writing them into the output directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::context::RenderingContext;
use crate::error::{PambaseError, PambaseResult};
use crate::options::StackOptions;
use crate::stack::StackName;
use crate::template_engine::{RenderedStack, StackRenderer, TemplateStore};

/// Directory stacks are written to when nothing else is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "stack";

/// What happened to one stack during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackOutcome {
    Written { path: PathBuf, lines: usize },
    /// Rendered empty; a file left over from an earlier run was removed if
    /// `removed_stale` is set.
    Skipped { removed_stale: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    pub outcomes: Vec<(StackName, StackOutcome)>,
}

impl GenerationReport {
    pub fn written(&self) -> impl Iterator<Item = (StackName, &Path)> {
        self.outcomes.iter().filter_map(|(name, outcome)| match outcome {
            StackOutcome::Written { path, .. } => Some((*name, path.as_path())),
            StackOutcome::Skipped { .. } => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = StackName> + '_ {
        self.outcomes.iter().filter_map(|(name, outcome)| match outcome {
            StackOutcome::Skipped { .. } => Some(*name),
            StackOutcome::Written { .. } => None,
        })
    }
}

/// Make sure `path` is a directory, creating it and its parents if needed.
pub fn prepare_output_dir(path: &Path) -> PambaseResult<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PambaseError::OutputNotDirectory {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            fs::create_dir_all(path).map_err(|e| PambaseError::io(path, e))?;
            tracing::debug!(path = %path.display(), "Created output directory");
            Ok(())
        }
        Err(e) => Err(PambaseError::io(path, e)),
    }
}

/// Render all nine stacks for `options` without touching the filesystem
/// beyond reading templates.
pub fn render_stacks(
    options: &StackOptions,
    store: &TemplateStore,
) -> PambaseResult<Vec<RenderedStack>> {
    let context = RenderingContext::new(options);
    StackRenderer::load(store)?.render_all(&context)
}

/// Write rendered stacks into `output_dir`, which must already exist.
///
/// Existing files are overwritten. A stack that rendered empty gets no file.
pub fn write_stacks(
    stacks: &[RenderedStack],
    output_dir: &Path,
) -> PambaseResult<GenerationReport> {
    let mut outcomes = Vec::with_capacity(stacks.len());

    for stack in stacks {
        let path = output_dir.join(stack.name.as_str());
        let outcome = match stack.file_contents() {
            Some(contents) => {
                fs::write(&path, contents).map_err(|e| PambaseError::io(&path, e))?;
                tracing::debug!(path = %path.display(), "Wrote stack");
                StackOutcome::Written {
                    path,
                    lines: stack.lines().count(),
                }
            }
            None => StackOutcome::Skipped {
                removed_stale: remove_stale(&path)?,
            },
        };
        outcomes.push((stack.name, outcome));
    }

    let report = GenerationReport {
        output_dir: output_dir.to_path_buf(),
        outcomes,
    };
    tracing::info!(
        output_dir = %output_dir.display(),
        written = report.written().count(),
        "Generated PAM stacks"
    );
    Ok(report)
}

/// Render every stack, then create `output_dir` if needed and write the
/// results.
///
/// Nothing is written unless all nine stacks render. Callers that already
/// ran [`prepare_output_dir`] can use [`render_stacks`] and [`write_stacks`]
/// directly.
pub fn generate(
    options: &StackOptions,
    store: &TemplateStore,
    output_dir: &Path,
) -> PambaseResult<GenerationReport> {
    let stacks = render_stacks(options, store)?;
    prepare_output_dir(output_dir)?;
    write_stacks(&stacks, output_dir)
}

fn remove_stale(path: &Path) -> PambaseResult<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Removed stale stack");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(PambaseError::io(path, e)),
    }
}
