//! Suggestion sources.
//!
//! A source answers a query either immediately (`Lookup::Ready`) or later
//! through `poll`. Closures `FnMut(&str) -> Vec<T>` are synchronous sources.

use std::sync::Arc;

use combo_session::LookupTicket;

use crate::error::LookupError;

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Ready(Vec<T>),
    /// The answer arrives through `SuggestionSource::poll`.
    Pending,
    Failed(LookupError),
}

/// An asynchronous answer to an earlier `search`.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion<T> {
    pub ticket: LookupTicket,
    pub result: Result<Vec<T>, LookupError>,
}

pub trait SuggestionSource<T> {
    fn search(&mut self, query: &str, ticket: LookupTicket) -> Lookup<T>;

    /// Next finished lookup, if any. Synchronous sources never have one.
    fn poll(&mut self) -> Option<Completion<T>> {
        None
    }
}

impl<T, F> SuggestionSource<T> for F
where
    F: FnMut(&str) -> Vec<T>,
{
    fn search(&mut self, query: &str, _ticket: LookupTicket) -> Lookup<T> {
        Lookup::Ready(self(query))
    }
}

/// Case-insensitive substring filter over a fixed list of options.
pub struct SubstringSource<T> {
    options: Vec<T>,
    key: Arc<dyn Fn(&T) -> String + Send + Sync>,
}

impl<T: Clone> SubstringSource<T> {
    /// `key` renders the text an option is matched on.
    pub fn new(options: Vec<T>, key: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self {
            options,
            key: Arc::new(key),
        }
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    pub fn filter(&self, query: &str) -> Vec<T> {
        let needle = query.to_lowercase();
        self.options
            .iter()
            .filter(|o| (self.key)(o).to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

impl<T: Clone + ToString> SubstringSource<T> {
    pub fn from_values(options: Vec<T>) -> Self {
        Self::new(options, |o: &T| o.to_string())
    }
}

impl<T: Clone> SuggestionSource<T> for SubstringSource<T> {
    fn search(&mut self, query: &str, _ticket: LookupTicket) -> Lookup<T> {
        Lookup::Ready(self.filter(query))
    }
}
