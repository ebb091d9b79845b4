//! Decides whether a query change should consult the suggestion source.

use crate::classify::query_len;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateConfig {
    pub min_length: usize,
    pub show_all_values: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_length: 0,
            show_all_values: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDecision {
    /// Ask the source for suggestions for the new query.
    Search,
    /// Drop the current suggestions and close the menu.
    ClearResults,
    /// Leave the suggestions as they are.
    NoOp,
}

pub fn should_search(prev_query: &str, next_query: &str, config: &GateConfig) -> SearchDecision {
    let next_len = query_len(next_query);
    let query_empty = next_len == 0;
    let length_changed = query_len(prev_query) != next_len;
    let long_enough = next_len >= config.min_length;

    if config.show_all_values || (!query_empty && length_changed && long_enough) {
        SearchDecision::Search
    } else if query_empty || !long_enough {
        SearchDecision::ClearResults
    } else {
        SearchDecision::NoOp
    }
}
