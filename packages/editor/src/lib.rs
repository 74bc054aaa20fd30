//! # Letterpress Editor
//!
//! Component identity and mutation engine for the email template editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │ markup: source text → tree → text               │
//! └─────────────────────────────────────────────────┘
//!                       ↓
//! ┌─────────────────────────────────────────────────┐
//! │ editor: component identity + mutations          │
//! │  - tagger: assign editable markers on load      │
//! │  - declarator: declare markers in the head      │
//! │  - mappings: marker → content fingerprints      │
//! │  - projector: annotate the compiled tree        │
//! │  - mutations: update / duplicate / delete       │
//! │  - history: bounded undo snapshots              │
//! └─────────────────────────────────────────────────┘
//!                       ↓
//! ┌─────────────────────────────────────────────────┐
//! │ external transformer: markup → HTML             │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Source text is the source of truth**: the compiled tree is a
//!    disposable, regenerated-every-pass byproduct; only the mutation
//!    engine ever touches the source tree.
//! 2. **Identity by fingerprint**: neither tree carries stable ids, so
//!    elements are correlated by marker token plus normalized content,
//!    with a deterministic exact → substring → first-in-order fallback.
//! 3. **Atomic mutations**: every operation returns either a fully
//!    mutated document or an error with the original left untouched.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use letterpress_editor::{ComponentMutation, EditSession, RenderPipeline};
//!
//! let mut session = EditSession::new("welcome", source)?;
//! let pipeline = RenderPipeline::new(transformer);
//!
//! let pass = pipeline.render(session.source())?;
//! // interactive layer reads pass.registry, echoes back a logical id
//!
//! session.apply(&ComponentMutation::UpdateContent {
//!     logical_id: "text-1".to_string(),
//!     content: "Hello!".to_string(),
//!     hint: None,
//! })?;
//! let pass = pipeline.render(session.source())?;
//! ```

mod declarator;
mod errors;
mod history;
mod mappings;
mod markers;
mod mutations;
mod pipeline;
mod projector;
mod session;
mod tagger;

pub use declarator::declare_markers;
pub use errors::EditError;
pub use history::{EditHistory, HISTORY_CAPACITY};
pub use mappings::{extract_mappings, MappingEntry};
pub use markers::{ElementKind, MARKER_ATTR, MARKER_PREFIX};
pub use mutations::{ComponentMutation, MutationOutcome, MAX_CONTENT_LEN};
pub use pipeline::{RenderPass, RenderPipeline, TransformOutput, Transformer};
pub use projector::{project, Projection, RegistryEntry};
pub use session::EditSession;
pub use tagger::auto_tag;

// Re-export the markup layer for convenience
pub use letterpress_markup::{parse, serialize, Document as MarkupDocument, ParseError};
