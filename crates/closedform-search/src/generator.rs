//! Candidate generation.
//!
//! Each seed is wrapped, one operator at a time, with an integer literal or
//! a named constant. Every candidate is evaluated; if its dimension matches
//! the target it is reported to the sink, and it becomes the seed of the
//! next step. Seeds are extended at step 1 and a step past
//! `max_expr_size` produces nothing, so every reported expression has at
//! most `2 * max_expr_size + 1` nodes.

use std::ops::AddAssign;

use closedform_constants::ConstantSet;
use closedform_core::{BinOp, Expr};
use closedform_simplify::Simplifier;
use closedform_units::{DimValue, Dimension, Real};

use crate::config::SearchConfig;
use crate::error::Result;
use crate::selector::ResultSink;

/// Counters of one generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeneratorStats {
    /// Candidates evaluated, seeds included.
    pub evaluated: usize,
    /// Candidates reported to the sink.
    pub recorded: usize,
    /// Illegal divisions, powers and out-of-range products skipped before
    /// evaluation.
    pub skipped: usize,
    /// Candidates dropped because the simplifier would rewrite them.
    pub pruned: usize,
}

impl AddAssign for GeneratorStats {
    fn add_assign(&mut self, rhs: Self) {
        self.evaluated += rhs.evaluated;
        self.recorded += rhs.recorded;
        self.skipped += rhs.skipped;
        self.pruned += rhs.pruned;
    }
}

/// Enumerates candidates for one target.
#[derive(Debug)]
pub struct Generator<'a> {
    constants: &'a ConstantSet,
    target: &'a DimValue,
    max_expr_size: usize,
    // integers[i] is the dimensionless magnitude i.
    integers: Vec<Real>,
    pruner: Option<Simplifier>,
}

impl<'a> Generator<'a> {
    /// Creates a generator over `constants` for `target`.
    #[must_use]
    pub fn new(constants: &'a ConstantSet, target: &'a DimValue, config: &SearchConfig) -> Self {
        let integers = (0..=config.max_int_constants)
            .map(|i| Real::from_i64(i64::try_from(i).unwrap_or(i64::MAX), config.precision))
            .collect();
        Self {
            constants,
            target,
            max_expr_size: config.max_expr_size,
            integers,
            pruner: config.prune_trivial.then(Simplifier::new),
        }
    }

    fn max_int(&self) -> usize {
        self.integers.len() - 1
    }

    fn literal(&self, i: usize, dimension: Dimension) -> Expr {
        Expr::literal(DimValue::new(self.integers[i].clone(), dimension))
    }

    /// The seeds: every constant, then the integers `1..=max_int_constants`
    /// in the target's dimension.
    #[must_use]
    pub fn seeds(&self) -> Vec<Expr> {
        let constants = self.constants.iter().map(|c| Expr::constant(c.clone()));
        let literals = (1..=self.max_int()).map(|i| self.literal(i, self.target.dimension()));
        constants.chain(literals).collect()
    }

    /// Runs every seed in order.
    ///
    /// # Errors
    ///
    /// Returns the first evaluation error; the run stops there.
    pub fn run<S: ResultSink>(&self, sink: &mut S) -> Result<GeneratorStats> {
        let mut stats = GeneratorStats::default();
        for seed in self.seeds() {
            self.explore(seed, sink, &mut stats)?;
        }
        Ok(stats)
    }

    /// Reports `seed` if it matches and explores everything grown from it.
    ///
    /// # Errors
    ///
    /// Returns the first evaluation error; the run stops there.
    pub fn explore<S: ResultSink>(
        &self,
        seed: Expr,
        sink: &mut S,
        stats: &mut GeneratorStats,
    ) -> Result<()> {
        self.test(seed, 0, sink, stats)
    }

    fn test<S: ResultSink>(
        &self,
        mut candidate: Expr,
        cursize: usize,
        sink: &mut S,
        stats: &mut GeneratorStats,
    ) -> Result<()> {
        if let Some(pruner) = &self.pruner {
            if pruner.is_trivial(&mut candidate)? {
                stats.pruned += 1;
                return Ok(());
            }
        }

        stats.evaluated += 1;
        let error = {
            let value = candidate.evaluate()?;
            if value.dimension() == self.target.dimension() {
                Some(value.abs_diff(self.target)?)
            } else {
                None
            }
        };
        if let Some(error) = error {
            stats.recorded += 1;
            sink.record(error, &candidate);
        }

        self.extend(&mut candidate, cursize + 1, sink, stats)
    }

    fn test_pow<S: ResultSink>(
        &self,
        base: Expr,
        exponent: Expr,
        cursize: usize,
        sink: &mut S,
        stats: &mut GeneratorStats,
    ) -> Result<()> {
        let legal = match (base.cached(), exponent.cached()) {
            (Some(b), Some(e)) => DimValue::check_pow(b, e).is_ok(),
            _ => false,
        };
        let candidate = legal.then(|| Expr::binary(BinOp::Pow, base, exponent));
        self.test_legal(candidate, cursize, sink, stats)
    }

    // Tests the candidate if there is one, otherwise counts a skip.
    fn test_legal<S: ResultSink>(
        &self,
        candidate: Option<Expr>,
        cursize: usize,
        sink: &mut S,
        stats: &mut GeneratorStats,
    ) -> Result<()> {
        match candidate {
            Some(candidate) => self.test(candidate, cursize, sink, stats),
            None => {
                stats.skipped += 1;
                Ok(())
            }
        }
    }

    fn extend<S: ResultSink>(
        &self,
        b: &mut Expr,
        cursize: usize,
        sink: &mut S,
        stats: &mut GeneratorStats,
    ) -> Result<()> {
        if cursize > self.max_expr_size {
            return Ok(());
        }
        let value = b.evaluate()?.clone();
        let dim = value.dimension();
        let target = self.target.dimension();
        let b: &Expr = b;

        // Literal units that bring a product or quotient back to the target
        // dimension. None where an exponent would leave the dimension range.
        let scale_up = target.checked_div(&dim);
        let scale_down = dim.checked_div(&target);
        let reciprocal = dim.checked_mul(&target);

        // Products and quotients by 1 are left to the simplifier.
        for i in 2..=self.max_int() {
            let times = scale_up.map(|unit| Expr::binary(BinOp::Mul, b.clone(), self.literal(i, unit)));
            self.test_legal(times, cursize, sink, stats)?;
            let over = scale_down.map(|unit| Expr::binary(BinOp::Div, b.clone(), self.literal(i, unit)));
            self.test_legal(over, cursize, sink, stats)?;
            let mut int = self.literal(i, Dimension::DIMENSIONLESS);
            int.evaluate()?;
            self.test_pow(int.clone(), b.clone(), cursize, sink, stats)?;
            self.test_pow(b.clone(), int, cursize, sink, stats)?;
        }

        for i in 1..=self.max_int() {
            let inverse = reciprocal
                .filter(|_| !value.is_zero())
                .map(|unit| Expr::binary(BinOp::Div, self.literal(i, unit), b.clone()));
            self.test_legal(inverse, cursize, sink, stats)?;
            self.test(
                Expr::binary(BinOp::Add, b.clone(), self.literal(i, dim)),
                cursize,
                sink,
                stats,
            )?;
            self.test(
                Expr::binary(BinOp::Sub, b.clone(), self.literal(i, dim)),
                cursize,
                sink,
                stats,
            )?;
            self.test(
                Expr::binary(BinOp::Sub, self.literal(i, dim), b.clone()),
                cursize,
                sink,
                stats,
            )?;
        }

        // Negation.
        self.test(
            Expr::binary(BinOp::Sub, self.literal(0, dim), b.clone()),
            cursize,
            sink,
            stats,
        )?;

        for constant in self.constants {
            let mut c = Expr::constant(constant.clone());
            let c_value = c.evaluate()?.clone();
            let c_dim = c_value.dimension();

            self.test_pow(c.clone(), b.clone(), cursize, sink, stats)?;
            self.test_pow(b.clone(), c.clone(), cursize, sink, stats)?;
            let product = dim
                .checked_mul(&c_dim)
                .map(|_| Expr::binary(BinOp::Mul, b.clone(), c.clone()));
            self.test_legal(product, cursize, sink, stats)?;
            let quotient = (!c_value.is_zero() && dim.checked_div(&c_dim).is_some())
                .then(|| Expr::binary(BinOp::Div, b.clone(), c.clone()));
            self.test_legal(quotient, cursize, sink, stats)?;
            let inverse = (!value.is_zero() && c_dim.checked_div(&dim).is_some())
                .then(|| Expr::binary(BinOp::Div, c.clone(), b.clone()));
            self.test_legal(inverse, cursize, sink, stats)?;
            if c_dim == dim {
                self.test(Expr::binary(BinOp::Add, b.clone(), c.clone()), cursize, sink, stats)?;
                self.test(Expr::binary(BinOp::Sub, b.clone(), c.clone()), cursize, sink, stats)?;
                self.test(Expr::binary(BinOp::Sub, c, b.clone()), cursize, sink, stats)?;
            }
        }

        Ok(())
    }
}
