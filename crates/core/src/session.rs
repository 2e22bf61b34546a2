//! Panel session state machines.
//!
//! Each search panel owns one [`PanelSession`]: an explicit state struct
//! driven by a pure transition function, [`PanelSession::apply`]. Events
//! come from the surrounding application (keystrokes, the search trigger,
//! result clicks, completed search tasks); effects tell the caller what to
//! do next (start an asynchronous search, show a notice). No timer or I/O
//! lives here, which keeps every transition deterministic and unit
//! testable.
//!
//! ## Stale completions
//!
//! The simulated search latency means a second search can be issued before
//! the first completes. Every accepted search request is tagged with a
//! monotonically increasing sequence number; a completion is applied only
//! when its sequence number equals the latest issued one, so an older
//! search can never overwrite a newer result set.

use medinfo_catalog::{RecordId, SearchQuery};
use serde::{Deserialize, Serialize};

/// Monotonic tag for one search invocation within a session.
pub type SearchSeq = u64;

/// The single currently-expanded record, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    NoSelection,
    Selected(RecordId),
}

/// What clicking an already-selected record does.
///
/// The observed application re-selects the record (no visible change);
/// collapsing on re-click is the plausible intent. Both are supported and
/// the choice is configuration, not code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReclickPolicy {
    /// Re-clicking the selected record leaves it expanded.
    KeepOpen,
    /// Re-clicking the selected record collapses it.
    Collapse,
}

/// User-visible notices raised by panel transitions.
///
/// These are transient notifications, not errors: the session itself stays
/// valid and nothing needs recovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// The user triggered a search with a blank query.
    SearchTermRequired,
    /// The search ran and matched nothing.
    NoResultsFound,
    /// The search ran and matched `total` records.
    SearchComplete { total: usize },
}

/// Events a panel session reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// The query text changed (every keystroke).
    QueryChanged(String),
    /// The user triggered a search (button or Enter key).
    SearchRequested,
    /// An asynchronous search finished.
    SearchCompleted {
        seq: SearchSeq,
        results: Vec<RecordId>,
    },
    /// The user clicked a record in the current result set.
    RecordClicked(RecordId),
    /// The selection was cleared externally (e.g. navigation).
    SelectionCleared,
}

/// Instructions for the caller produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEffect {
    /// Start an asynchronous search tagged with `seq`. The caller applies
    /// the configured latency and feeds the outcome back as
    /// [`PanelEvent::SearchCompleted`].
    BeginSearch { seq: SearchSeq, query: SearchQuery },
    /// Show a transient notice to the user.
    Notify(Notice),
}

/// State of one search panel.
#[derive(Debug, Clone)]
pub struct PanelSession {
    query: String,
    loading: bool,
    results: Vec<RecordId>,
    selection: Selection,
    issued: SearchSeq,
    reclick_policy: ReclickPolicy,
}

impl PanelSession {
    /// Creates an idle session with an empty query and no selection.
    pub fn new(reclick_policy: ReclickPolicy) -> Self {
        Self {
            query: String::new(),
            loading: false,
            results: Vec::new(),
            selection: Selection::NoSelection,
            issued: 0,
            reclick_policy,
        }
    }

    /// Current query text as typed, untrimmed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// True while a search is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Record ids of the most recently applied result set, in catalog
    /// order.
    pub fn results(&self) -> &[RecordId] {
        &self.results
    }

    /// The currently-expanded record, if any.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Sequence number of the most recently issued search.
    pub fn issued_seq(&self) -> SearchSeq {
        self.issued
    }

    /// Applies one event and returns the effects the caller must perform.
    pub fn apply(&mut self, event: PanelEvent) -> Vec<PanelEffect> {
        match event {
            PanelEvent::QueryChanged(text) => {
                self.query = text;
                Vec::new()
            }
            PanelEvent::SearchRequested => match SearchQuery::new(&self.query) {
                Err(_) => {
                    // Blank query: prompt the user, leave the result set
                    // and selection untouched.
                    vec![PanelEffect::Notify(Notice::SearchTermRequired)]
                }
                Ok(query) => {
                    self.issued += 1;
                    self.loading = true;
                    self.selection = Selection::NoSelection;
                    vec![PanelEffect::BeginSearch {
                        seq: self.issued,
                        query,
                    }]
                }
            },
            PanelEvent::SearchCompleted { seq, results } => {
                if seq != self.issued {
                    tracing::debug!(seq, latest = self.issued, "discarding stale search result");
                    return Vec::new();
                }
                self.loading = false;
                self.results = results;
                if self.results.is_empty() {
                    vec![PanelEffect::Notify(Notice::NoResultsFound)]
                } else {
                    vec![PanelEffect::Notify(Notice::SearchComplete {
                        total: self.results.len(),
                    })]
                }
            }
            PanelEvent::RecordClicked(id) => {
                // Only records in the current result set can be expanded.
                if !self.results.contains(&id) {
                    return Vec::new();
                }
                self.selection = match (self.selection, self.reclick_policy) {
                    (Selection::Selected(current), ReclickPolicy::Collapse) if current == id => {
                        Selection::NoSelection
                    }
                    _ => Selection::Selected(id),
                };
                Vec::new()
            }
            PanelEvent::SelectionCleared => {
                self.selection = Selection::NoSelection;
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_results(ids: &[RecordId]) -> PanelSession {
        let mut session = PanelSession::new(ReclickPolicy::KeepOpen);
        session.apply(PanelEvent::QueryChanged("cancer".into()));
        let effects = session.apply(PanelEvent::SearchRequested);
        let seq = match &effects[0] {
            PanelEffect::BeginSearch { seq, .. } => *seq,
            other => panic!("expected BeginSearch, got {:?}", other),
        };
        session.apply(PanelEvent::SearchCompleted {
            seq,
            results: ids.to_vec(),
        });
        session
    }

    #[test]
    fn test_blank_search_prompts_and_preserves_results() {
        let mut session = session_with_results(&[4, 5]);
        session.apply(PanelEvent::QueryChanged("   ".into()));
        let effects = session.apply(PanelEvent::SearchRequested);

        assert_eq!(
            effects,
            vec![PanelEffect::Notify(Notice::SearchTermRequired)]
        );
        assert_eq!(session.results(), &[4, 5]);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_search_request_trims_query() {
        let mut session = PanelSession::new(ReclickPolicy::KeepOpen);
        session.apply(PanelEvent::QueryChanged("  fever ".into()));
        let effects = session.apply(PanelEvent::SearchRequested);
        match &effects[0] {
            PanelEffect::BeginSearch { query, .. } => assert_eq!(query.as_str(), "fever"),
            other => panic!("expected BeginSearch, got {:?}", other),
        }
        assert!(session.is_loading());
    }

    #[test]
    fn test_search_request_clears_selection() {
        let mut session = session_with_results(&[4, 5]);
        session.apply(PanelEvent::RecordClicked(4));
        assert_eq!(session.selection(), Selection::Selected(4));

        session.apply(PanelEvent::SearchRequested);
        assert_eq!(session.selection(), Selection::NoSelection);
    }

    #[test]
    fn test_completion_replaces_results_wholesale() {
        let mut session = session_with_results(&[4, 5]);
        session.apply(PanelEvent::QueryChanged("fever".into()));
        let effects = session.apply(PanelEvent::SearchRequested);
        let seq = match &effects[0] {
            PanelEffect::BeginSearch { seq, .. } => *seq,
            other => panic!("expected BeginSearch, got {:?}", other),
        };
        let effects = session.apply(PanelEvent::SearchCompleted {
            seq,
            results: vec![3],
        });
        assert_eq!(session.results(), &[3]);
        assert_eq!(
            effects,
            vec![PanelEffect::Notify(Notice::SearchComplete { total: 1 })]
        );
    }

    #[test]
    fn test_empty_completion_raises_no_results_notice() {
        let mut session = PanelSession::new(ReclickPolicy::KeepOpen);
        session.apply(PanelEvent::QueryChanged("xyz-not-present".into()));
        let effects = session.apply(PanelEvent::SearchRequested);
        let seq = match &effects[0] {
            PanelEffect::BeginSearch { seq, .. } => *seq,
            other => panic!("expected BeginSearch, got {:?}", other),
        };
        let effects = session.apply(PanelEvent::SearchCompleted {
            seq,
            results: vec![],
        });
        assert_eq!(effects, vec![PanelEffect::Notify(Notice::NoResultsFound)]);
        assert!(session.results().is_empty());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut session = PanelSession::new(ReclickPolicy::KeepOpen);

        session.apply(PanelEvent::QueryChanged("cancer".into()));
        let first = session.apply(PanelEvent::SearchRequested);
        let first_seq = match &first[0] {
            PanelEffect::BeginSearch { seq, .. } => *seq,
            other => panic!("expected BeginSearch, got {:?}", other),
        };

        // A second search is issued before the first completes.
        session.apply(PanelEvent::QueryChanged("fever".into()));
        let second = session.apply(PanelEvent::SearchRequested);
        let second_seq = match &second[0] {
            PanelEffect::BeginSearch { seq, .. } => *seq,
            other => panic!("expected BeginSearch, got {:?}", other),
        };
        assert!(second_seq > first_seq);

        // The newer search completes first.
        session.apply(PanelEvent::SearchCompleted {
            seq: second_seq,
            results: vec![3],
        });
        assert_eq!(session.results(), &[3]);

        // The stale completion arrives late and must change nothing.
        let effects = session.apply(PanelEvent::SearchCompleted {
            seq: first_seq,
            results: vec![4, 5],
        });
        assert!(effects.is_empty());
        assert_eq!(session.results(), &[3]);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_selecting_second_record_deselects_first() {
        let mut session = session_with_results(&[4, 5]);
        session.apply(PanelEvent::RecordClicked(4));
        session.apply(PanelEvent::RecordClicked(5));
        assert_eq!(session.selection(), Selection::Selected(5));
    }

    #[test]
    fn test_click_outside_result_set_is_ignored() {
        let mut session = session_with_results(&[4, 5]);
        session.apply(PanelEvent::RecordClicked(99));
        assert_eq!(session.selection(), Selection::NoSelection);
    }

    #[test]
    fn test_reclick_keep_open_policy() {
        let mut session = session_with_results(&[4, 5]);
        session.apply(PanelEvent::RecordClicked(4));
        session.apply(PanelEvent::RecordClicked(4));
        assert_eq!(session.selection(), Selection::Selected(4));
    }

    #[test]
    fn test_reclick_collapse_policy() {
        let mut session = PanelSession::new(ReclickPolicy::Collapse);
        session.apply(PanelEvent::QueryChanged("cancer".into()));
        let effects = session.apply(PanelEvent::SearchRequested);
        let seq = match &effects[0] {
            PanelEffect::BeginSearch { seq, .. } => *seq,
            other => panic!("expected BeginSearch, got {:?}", other),
        };
        session.apply(PanelEvent::SearchCompleted {
            seq,
            results: vec![4, 5],
        });

        session.apply(PanelEvent::RecordClicked(4));
        assert_eq!(session.selection(), Selection::Selected(4));
        session.apply(PanelEvent::RecordClicked(4));
        assert_eq!(session.selection(), Selection::NoSelection);

        // Collapsing one record does not block selecting another.
        session.apply(PanelEvent::RecordClicked(5));
        assert_eq!(session.selection(), Selection::Selected(5));
    }

    #[test]
    fn test_selection_cleared_event() {
        let mut session = session_with_results(&[4]);
        session.apply(PanelEvent::RecordClicked(4));
        session.apply(PanelEvent::SelectionCleared);
        assert_eq!(session.selection(), Selection::NoSelection);
    }

    #[test]
    fn test_keystrokes_do_not_touch_results_or_selection() {
        let mut session = session_with_results(&[4, 5]);
        session.apply(PanelEvent::RecordClicked(5));
        session.apply(PanelEvent::QueryChanged("something else".into()));
        assert_eq!(session.results(), &[4, 5]);
        assert_eq!(session.selection(), Selection::Selected(5));
        assert_eq!(session.query(), "something else");
    }
}
