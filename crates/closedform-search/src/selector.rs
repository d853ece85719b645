//! Result collection and ranking.
//!
//! The generator reports every candidate whose dimension matches the target
//! to a [`ResultSink`]. A `Vec<SearchResult>` keeps them all; a [`Selector`]
//! keeps the `capacity` best distinct errors, with the smallest expression
//! for each error.

use std::collections::BTreeMap;

use closedform_core::Expr;
use closedform_units::Real;

/// A candidate whose dimension matches the target.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// `|value - target|`.
    pub error: Real,
    /// The candidate.
    pub expr: Expr,
}

/// Receives matching candidates from the generator.
pub trait ResultSink {
    /// Records a candidate. Implementations clone `expr` if they keep it.
    fn record(&mut self, error: Real, expr: &Expr);
}

impl ResultSink for Vec<SearchResult> {
    fn record(&mut self, error: Real, expr: &Expr) {
        self.push(SearchResult {
            error,
            expr: expr.clone(),
        });
    }
}

/// Keeps the best distinct errors seen so far.
///
/// For equal errors the smaller expression wins; on equal size the one
/// recorded first is kept.
#[derive(Clone, Debug)]
pub struct Selector {
    capacity: usize,
    entries: BTreeMap<Real, Expr>,
}

impl Selector {
    /// Creates a selector keeping at most `capacity` results.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: BTreeMap::new(),
        }
    }

    /// Dedups and ranks a complete list of results, returning the first
    /// `top` by ascending error.
    #[must_use]
    pub fn select<I>(results: I, top: usize) -> Vec<SearchResult>
    where
        I: IntoIterator<Item = SearchResult>,
    {
        let mut selector = Self::new(top);
        for result in results {
            selector.admit(result.error, result.expr.size(), || result.expr);
        }
        selector.into_results()
    }

    /// Offers a candidate. Returns true if it was kept.
    pub fn offer(&mut self, error: Real, expr: &Expr) -> bool {
        self.admit(error, expr.size(), || expr.clone())
    }

    /// Folds in a selector built over later candidates.
    ///
    /// Merging the per-seed selectors in seed order gives the same entries
    /// as offering every candidate to one selector.
    pub fn merge(&mut self, other: Self) {
        for (error, expr) in other.entries {
            let size = expr.size();
            self.admit(error, size, || expr);
        }
    }

    fn admit(&mut self, error: Real, size: usize, expr: impl FnOnce() -> Expr) -> bool {
        if let Some(existing) = self.entries.get_mut(&error) {
            if size < existing.size() {
                *existing = expr();
                return true;
            }
            return false;
        }

        if self.entries.len() >= self.capacity {
            let beats_worst =
                matches!(self.entries.last_key_value(), Some((worst, _)) if error < *worst);
            if !beats_worst {
                return false;
            }
            self.entries.pop_last();
        }
        self.entries.insert(error, expr());
        true
    }

    /// Maximum number of kept results.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of kept results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been kept.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Kept results by ascending error.
    pub fn iter(&self) -> impl Iterator<Item = (&Real, &Expr)> {
        self.entries.iter()
    }

    /// Kept results by ascending error.
    #[must_use]
    pub fn into_results(self) -> Vec<SearchResult> {
        self.entries
            .into_iter()
            .map(|(error, expr)| SearchResult { error, expr })
            .collect()
    }
}

impl ResultSink for Selector {
    fn record(&mut self, error: Real, expr: &Expr) {
        self.offer(error, expr);
    }
}
