//! Tree pruning: comment removal and best-effort selector catalogues.

use dom_query::{Document, Matcher};
use tracing::{debug, warn};

use crate::dom;

/// What happened to one catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorOutcome {
    /// The selector parsed and its matches (possibly zero) were removed.
    Applied { removed: usize },
    /// The selector could not be evaluated; the rest of the catalogue still
    /// applies.
    Skipped { reason: String },
}

/// One catalogue entry paired with its outcome, for diagnostics.
#[derive(Debug, Clone)]
pub struct SelectorReport {
    pub selector: &'static str,
    pub outcome: SelectorOutcome,
}

/// Remove every node matching each selector in the catalogue.
///
/// Entries are independent: an unparsable entry is reported as skipped and
/// all others still apply.
pub fn remove_by_selectors(doc: &Document, selectors: &[&'static str]) -> Vec<SelectorReport> {
    selectors
        .iter()
        .map(|&selector| {
            let outcome = match Matcher::new(selector) {
                Ok(matcher) => {
                    let matches = doc.select_matcher(&matcher);
                    let removed = matches.length();
                    if removed > 0 {
                        matches.remove();
                    }
                    SelectorOutcome::Applied { removed }
                }
                Err(_) => {
                    warn!(selector, "skipping unparsable removal selector");
                    SelectorOutcome::Skipped {
                        reason: "unparsable selector".to_string(),
                    }
                }
            };
            SelectorReport { selector, outcome }
        })
        .collect()
}

/// Total nodes removed across a catalogue run.
#[must_use]
pub fn removed_count(reports: &[SelectorReport]) -> usize {
    reports
        .iter()
        .map(|report| match report.outcome {
            SelectorOutcome::Applied { removed } => removed,
            SelectorOutcome::Skipped { .. } => 0,
        })
        .sum()
}

/// First pass over a freshly parsed page: drop comments, scripts, styles,
/// hidden accessibility text, coordinate widgets, and site furniture.
pub fn preprocess(doc: &Document) {
    dom::remove_comments(doc);
    let reports = remove_by_selectors(doc, &crate::patterns::PREPROCESS_SELECTORS);
    debug!(removed = removed_count(&reports), "preprocess pruning done");
}
