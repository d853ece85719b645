//! Search configuration.

use closedform_units::Precision;

use crate::error::{Result, SearchError};

/// Number of results reported by default.
pub const DEFAULT_TOP: usize = 30;

/// Bounds and switches for one search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Precision of literals and of the reported errors.
    pub precision: Precision,
    /// Number of extension steps applied to each seed.
    pub max_expr_size: usize,
    /// Largest integer literal used in candidates.
    pub max_int_constants: usize,
    /// Number of ranked results kept.
    pub top: usize,
    /// Worker threads. `None` uses the global rayon pool.
    pub threads: Option<usize>,
    /// Simplify winning expressions before display.
    pub simplify_results: bool,
    /// Skip candidates the simplifier would rewrite at the root.
    pub prune_trivial: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            max_expr_size: 1,
            max_int_constants: 0,
            top: DEFAULT_TOP,
            threads: None,
            simplify_results: true,
            prune_trivial: false,
        }
    }
}

impl SearchConfig {
    /// Creates a configuration with the given bounds.
    #[must_use]
    pub fn new(max_expr_size: usize, max_int_constants: usize) -> Self {
        Self {
            max_expr_size,
            max_int_constants,
            ..Self::default()
        }
    }

    /// Sets the precision.
    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the number of reported results.
    #[must_use]
    pub fn with_top(mut self, top: usize) -> Self {
        self.top = top;
        self
    }

    /// Runs on a dedicated pool of `threads` workers.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Enables or disables simplification of the results.
    #[must_use]
    pub fn with_simplify_results(mut self, simplify: bool) -> Self {
        self.simplify_results = simplify;
        self
    }

    /// Enables or disables pruning of trivial candidates.
    #[must_use]
    pub fn with_prune_trivial(mut self, prune: bool) -> Self {
        self.prune_trivial = prune;
        self
    }

    /// Checks the bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidBounds`] if `max_expr_size`, `top` or
    /// `threads` is zero.
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &'static str, value: usize| {
            if value == 0 {
                Err(SearchError::InvalidBounds {
                    name,
                    value,
                    reason: "must be at least 1",
                })
            } else {
                Ok(())
            }
        };
        positive("max_expr_size", self.max_expr_size)?;
        positive("top", self.top)?;
        if let Some(threads) = self.threads {
            positive("threads", threads)?;
        }
        Ok(())
    }
}
