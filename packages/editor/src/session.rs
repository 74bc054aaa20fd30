//! Edit session
//!
//! Owns the authoritative source text for one open template plus its undo
//! history. The session is the only place snapshots are pushed and popped;
//! switching templates clears history so undo never crosses document
//! boundaries.

use crate::errors::EditError;
use crate::history::EditHistory;
use crate::mutations::ComponentMutation;
use crate::tagger::auto_tag;

/// Single-user editing state for one open template.
pub struct EditSession {
    template_id: String,
    source: String,
    history: EditHistory,
}

impl EditSession {
    /// Open a template. Default markers are assigned here, exactly once
    /// per document-loading transition.
    pub fn new(template_id: impl Into<String>, source: &str) -> Result<Self, EditError> {
        let tagged = auto_tag(source)?;
        Ok(Self {
            template_id: template_id.into(),
            source: tagged,
            history: EditHistory::new(),
        })
    }

    /// Switch to a different template, dropping all undo state.
    pub fn open(&mut self, template_id: impl Into<String>, source: &str) -> Result<(), EditError> {
        let tagged = auto_tag(source)?;
        self.template_id = template_id.into();
        self.source = tagged;
        self.history.clear();
        Ok(())
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    /// Current authoritative source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Apply a mutation to the current source, recording the pre-mutation
    /// snapshot for undo. Returns the logical id minted by a duplicate.
    pub fn apply(&mut self, mutation: &ComponentMutation) -> Result<Option<String>, EditError> {
        let outcome = mutation.apply(&self.source)?;
        self.history.push(self.source.clone());
        self.source = outcome.source;
        Ok(outcome.new_id)
    }

    /// Restore the most recent snapshot. Returns false with the source
    /// untouched when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.source = previous;
                true
            }
            None => false,
        }
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str =
        "<mjml><mj-head></mj-head><mj-body><mj-text>Hello</mj-text></mj-body></mjml>";

    #[test]
    fn test_new_session_auto_tags_once() {
        let session = EditSession::new("welcome", SOURCE).unwrap();
        assert!(session.source().contains(r#"css-class="editable-text-1""#));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_apply_records_undo_snapshot() {
        let mut session = EditSession::new("welcome", SOURCE).unwrap();
        let before = session.source().to_string();

        session
            .apply(&ComponentMutation::UpdateContent {
                logical_id: "text-1".to_string(),
                content: "Changed".to_string(),
                hint: None,
            })
            .unwrap();

        assert!(session.source().contains("Changed"));
        assert_eq!(session.history().len(), 1);

        assert!(session.undo());
        assert_eq!(session.source(), before);
        assert!(!session.undo());
    }

    #[test]
    fn test_failed_mutation_leaves_source_and_history_untouched() {
        let mut session = EditSession::new("welcome", SOURCE).unwrap();
        let before = session.source().to_string();

        let err = session.apply(&ComponentMutation::Delete {
            logical_id: "missing".to_string(),
            hint: None,
        });
        assert!(err.is_err());
        assert_eq!(session.source(), before);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_open_clears_history() {
        let mut session = EditSession::new("a", SOURCE).unwrap();
        session
            .apply(&ComponentMutation::UpdateContent {
                logical_id: "text-1".to_string(),
                content: "Changed".to_string(),
                hint: None,
            })
            .unwrap();
        assert_eq!(session.history().len(), 1);

        session.open("b", SOURCE).unwrap();
        assert_eq!(session.template_id(), "b");
        assert!(session.history().is_empty());
        assert!(!session.undo());
    }

    #[test]
    fn test_duplicate_returns_minted_id() {
        let mut session = EditSession::new("welcome", SOURCE).unwrap();
        let new_id = session
            .apply(&ComponentMutation::Duplicate {
                logical_id: "text-1".to_string(),
                hint: None,
            })
            .unwrap()
            .expect("duplicate mints an id");
        assert!(new_id.starts_with("text-1-copy-"));
    }
}
