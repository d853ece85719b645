//! The search driver.
//!
//! Seeds are explored in parallel, each into a private [`Selector`]; the
//! selectors are merged in seed order, so the ranking does not depend on
//! the number of threads.

use closedform_constants::ConstantSet;
use closedform_core::Expr;
use closedform_simplify::Simplifier;
use closedform_units::{DimValue, Real};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::error::Result;
use crate::generator::{Generator, GeneratorStats};
use crate::selector::{SearchResult, Selector};

/// A ranked result ready for display.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedResult {
    /// Fully parenthesized expression.
    pub display: String,
    /// `|value - target|`.
    pub error: Real,
    /// The expression, simplified if the search was configured to.
    pub expr: Expr,
}

/// What a search found.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Results by ascending error.
    pub results: Vec<RankedResult>,
    /// Generation counters summed over all seeds.
    pub stats: GeneratorStats,
}

impl SearchOutcome {
    /// The closest result.
    #[must_use]
    pub fn best(&self) -> Option<&RankedResult> {
        self.results.first()
    }

    /// Whether nothing matched the target's dimension.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// A configured search for one target.
#[derive(Clone, Debug)]
pub struct Search<'a> {
    constants: &'a ConstantSet,
    target: &'a DimValue,
    config: SearchConfig,
}

impl<'a> Search<'a> {
    /// Creates a search for `target` over `constants`.
    #[must_use]
    pub fn new(constants: &'a ConstantSet, target: &'a DimValue, config: SearchConfig) -> Self {
        Self {
            constants,
            target,
            config,
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the search, exploring seeds in parallel.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidBounds`](crate::SearchError::InvalidBounds)
    /// for a bad configuration, the first evaluation error, or a thread pool
    /// construction failure.
    pub fn run(&self) -> Result<SearchOutcome> {
        self.config.validate()?;
        self.log_start();

        let generator = Generator::new(self.constants, self.target, &self.config);
        let seeds = generator.seeds();
        let top = self.config.top;

        let explore_all = || {
            seeds
                .into_par_iter()
                .enumerate()
                .map(|(index, seed)| {
                    debug!(seed = index, expr = %seed, "exploring seed");
                    let mut selector = Selector::new(top);
                    let mut stats = GeneratorStats::default();
                    generator.explore(seed, &mut selector, &mut stats)?;
                    Ok((selector, stats))
                })
                .collect::<Result<Vec<_>>>()
        };

        let per_seed = match self.config.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(explore_all)?,
            None => explore_all()?,
        };

        let mut selector = Selector::new(top);
        let mut stats = GeneratorStats::default();
        for (seed_selector, seed_stats) in per_seed {
            selector.merge(seed_selector);
            stats += seed_stats;
        }
        self.finish(selector, stats)
    }

    /// Runs the search on the calling thread.
    ///
    /// # Errors
    ///
    /// As [`Search::run`], minus thread pool failures.
    pub fn run_sequential(&self) -> Result<SearchOutcome> {
        self.config.validate()?;
        self.log_start();

        let generator = Generator::new(self.constants, self.target, &self.config);
        let mut selector = Selector::new(self.config.top);
        let stats = generator.run(&mut selector)?;
        self.finish(selector, stats)
    }

    /// Runs the generator and returns every matching candidate, unranked.
    ///
    /// # Errors
    ///
    /// As [`Search::run_sequential`].
    pub fn collect_all(&self) -> Result<Vec<SearchResult>> {
        self.config.validate()?;
        let mut results = Vec::new();
        Generator::new(self.constants, self.target, &self.config).run(&mut results)?;
        Ok(results)
    }

    fn log_start(&self) {
        info!(
            target_value = %self.target,
            constants = self.constants.len(),
            max_expr_size = self.config.max_expr_size,
            max_int_constants = self.config.max_int_constants,
            "starting search"
        );
    }

    fn finish(&self, selector: Selector, stats: GeneratorStats) -> Result<SearchOutcome> {
        let digits = self.config.precision.digits() as usize;
        let simplifier = self.config.simplify_results.then(Simplifier::new);

        let mut results = Vec::with_capacity(selector.len());
        for SearchResult { error, mut expr } in selector.into_results() {
            if let Some(simplifier) = &simplifier {
                simplifier.simplify(&mut expr)?;
            }
            results.push(RankedResult {
                display: format!("{expr:.digits$}"),
                error,
                expr,
            });
        }

        info!(
            evaluated = stats.evaluated,
            recorded = stats.recorded,
            skipped = stats.skipped,
            pruned = stats.pruned,
            results = results.len(),
            "search finished"
        );
        Ok(SearchOutcome { results, stats })
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use closedform_core::NamedConstant;
    use closedform_units::Precision;

    use crate::SearchError;

    fn value(text: &str) -> DimValue {
        DimValue::parse(text, Precision::default()).unwrap()
    }

    fn constants(defs: &[(&str, &str)]) -> ConstantSet {
        ConstantSet::from_constants(defs.iter().map(|(n, v)| NamedConstant::new(*n, value(v))))
            .unwrap()
    }

    #[test]
    fn test_rejects_invalid_bounds() {
        let set = ConstantSet::new();
        let target = value("1");
        let err = Search::new(&set, &target, SearchConfig::new(0, 2))
            .run()
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidBounds { .. }));
    }

    #[test]
    fn test_results_sorted_and_bounded() {
        let set = constants(&[("pi", "3.14159265358979323846"), ("e", "2.71828182845904523536")]);
        let target = value("1.2345");
        let outcome = Search::new(&set, &target, SearchConfig::new(1, 3).with_top(10))
            .run()
            .unwrap();
        assert_eq!(outcome.results.len(), 10);
        assert!(outcome
            .results
            .windows(2)
            .all(|pair| pair[0].error < pair[1].error));
    }

    #[test]
    fn test_simplified_display() {
        // Every zero-error candidate loses to the bare literal.
        let set = ConstantSet::new();
        let target = value("3");
        let outcome = Search::new(&set, &target, SearchConfig::new(1, 3))
            .run()
            .unwrap();
        let best = outcome.best().unwrap();
        assert_eq!(best.display, "3");
        assert_eq!(best.error.to_string_sig(5), "0");
    }

    #[test]
    fn test_threads_match_sequential() {
        let set = constants(&[("pi", "3.14159265358979323846"), ("g", "9.80665 m/s^2")]);
        let target = value("1.7 m/s^2");
        let search = Search::new(&set, &target, SearchConfig::new(1, 3).with_threads(3));
        let parallel = search.run().unwrap();
        let sequential = search.run_sequential().unwrap();
        assert_eq!(parallel.results, sequential.results);
        assert_eq!(parallel.stats, sequential.stats);
    }

    #[test]
    fn test_out_of_range_powers_skipped() {
        // huge ^ huge would leave the exponent range and is never evaluated.
        let set = constants(&[("huge", "1e900000000")]);
        let target = value("1");
        let outcome = Search::new(&set, &target, SearchConfig::new(1, 0))
            .run()
            .unwrap();
        assert!(outcome.stats.skipped > 0);
        assert!(outcome.results.iter().all(|r| r.display != "(huge ^ huge)"));
    }

    #[test]
    fn test_integer_towers_finish_quickly() {
        // Towers such as 9 ^ (9 ^ 9) are skipped rather than expanded.
        let set = ConstantSet::new();
        let target = value("1.5");
        let start = Instant::now();
        let outcome = Search::new(&set, &target, SearchConfig::new(2, 9))
            .run()
            .unwrap();
        assert!(start.elapsed() < Duration::from_secs(120));
        assert!(outcome.stats.skipped > 0);
        assert_eq!(outcome.best().unwrap().error.to_string_sig(5), "0");
    }

    #[test]
    fn test_huge_constant_compares_cheaply() {
        let set = constants(&[("huge", "1e900000000")]);
        let target = value("2");
        let start = Instant::now();
        let outcome = Search::new(&set, &target, SearchConfig::new(1, 2))
            .run()
            .unwrap();
        assert!(start.elapsed() < Duration::from_secs(60));
        assert_eq!(outcome.best().unwrap().display, "2");
        assert!(outcome.stats.recorded > outcome.results.len());
    }
}
