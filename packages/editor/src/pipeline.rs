//! Render pipeline
//!
//! Coordinates one transformation pass: declare → extract → transform →
//! project. The compiled tree and registry are wholesale regenerated from
//! the current source text on every pass; nothing here is cached or
//! persisted, which keeps identical inputs yielding identical passes.

use crate::declarator::declare_markers;
use crate::errors::EditError;
use crate::mappings::{extract_mappings, MappingEntry};
use crate::projector::{project, RegistryEntry};
use serde::{Deserialize, Serialize};

/// Output of the external transformer: compiled HTML plus diagnostics the
/// core passes through without interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformOutput {
    pub html: String,
    pub diagnostics: Vec<String>,
}

/// Seam for the external, unmodifiable markup → HTML transformer.
pub trait Transformer {
    fn transform(&self, markup: &str) -> TransformOutput;
}

impl<F> Transformer for F
where
    F: Fn(&str) -> TransformOutput,
{
    fn transform(&self, markup: &str) -> TransformOutput {
        self(markup)
    }
}

/// One complete transformation pass over a source document.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPass {
    /// Source text with all markers declared (the text that was compiled).
    pub source: String,

    /// Annotated compiled HTML for the interactive layer.
    pub html: String,

    /// Mapping list computed for this pass.
    pub mappings: Vec<MappingEntry>,

    /// Registry exposed to the interactive layer.
    pub registry: Vec<RegistryEntry>,

    /// Transformer diagnostics, passed through uninterpreted.
    pub diagnostics: Vec<String>,
}

/// Runs the declare → extract → transform → project pass.
pub struct RenderPipeline<T: Transformer> {
    transformer: T,
}

impl<T: Transformer> RenderPipeline<T> {
    pub fn new(transformer: T) -> Self {
        Self { transformer }
    }

    /// Run one full pass over the current source text.
    pub fn render(&self, source: &str) -> Result<RenderPass, EditError> {
        let declared = declare_markers(source)?;
        let mappings = extract_mappings(&declared);

        let output = self.transformer.transform(&declared);
        let projection = project(&output.html, &mappings)?;

        tracing::debug!(
            mappings = mappings.len(),
            annotated = projection.registry.len(),
            diagnostics = output.diagnostics.len(),
            "render pass complete"
        );

        Ok(RenderPass {
            source: declared,
            html: projection.html,
            mappings,
            registry: projection.registry,
            diagnostics: output.diagnostics,
        })
    }

    pub fn transformer(&self) -> &T {
        &self.transformer
    }
}
