//! The main simplification engine.
//!
//! The engine walks the tree top-down. At each binary node it applies the
//! first matching rule until none matches, then simplifies the operands; if
//! an operand changed, the node is marked dirty and checked again. The
//! result is a fixed point: simplifying it again performs no rewrites.

use closedform_core::Expr;
use closedform_units::Result;

use crate::rules::{first_match, Rule};

/// Statistics about one simplification run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimplificationStats {
    /// Number of rules applied.
    pub rewrites: usize,
    /// Number of node visits, counting re-checks after an operand changed.
    pub passes: usize,
    /// Rules applied, in application order.
    pub applied: Vec<Rule>,
}

impl SimplificationStats {
    /// Returns true if the expression was already simplified.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.rewrites == 0
    }
}

/// The main simplification engine.
#[derive(Clone, Debug)]
pub struct Simplifier {
    rules: Vec<Rule>,
}

impl Default for Simplifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Simplifier {
    /// Creates a simplifier with every rule enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: Rule::ALL.to_vec(),
        }
    }

    /// Restricts the simplifier to `rules`, tried in the given order.
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    /// The active rules in priority order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns true if a rule applies at the root of `expr`.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors of the root's operands.
    pub fn is_trivial(&self, expr: &mut Expr) -> Result<bool> {
        Ok(first_match(&self.rules, expr)?.is_some())
    }

    /// Simplifies `expr` in place.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors raised while matching rules.
    pub fn simplify(&self, expr: &mut Expr) -> Result<SimplificationStats> {
        let mut stats = SimplificationStats::default();
        self.simplify_node(expr, &mut stats)?;
        Ok(stats)
    }

    /// Returns a simplified copy of `expr`.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors raised while matching rules.
    pub fn simplified(&self, expr: &Expr) -> Result<Expr> {
        let mut copy = expr.clone();
        self.simplify(&mut copy)?;
        Ok(copy)
    }

    fn simplify_node(&self, node: &mut Expr, stats: &mut SimplificationStats) -> Result<bool> {
        let mut changed = false;
        loop {
            stats.passes += 1;
            while let Some(rule) = first_match(&self.rules, node)? {
                rule.apply(node);
                stats.rewrites += 1;
                stats.applied.push(rule);
                changed = true;
            }

            let Some((_, lhs, rhs)) = node.operands_mut() else {
                break;
            };
            let lhs_changed = self.simplify_node(lhs, stats)?;
            let rhs_changed = self.simplify_node(rhs, stats)?;
            if !(lhs_changed || rhs_changed) {
                break;
            }
            node.mark_dirty();
            changed = true;
        }
        Ok(changed)
    }
}
