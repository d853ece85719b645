//! Rewrite rules, in priority order.

use closedform_core::{BinOp, Expr};
use closedform_units::Result;

/// A rewrite rule applied at a binary node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `0 + x => x`
    AddZeroLeft,
    /// `x + 0 => x`
    AddZeroRight,
    /// `x - 0 => x`
    SubZero,
    /// `1 * x => x`
    MulOneLeft,
    /// `x * 1 => x`
    MulOneRight,
    /// `x / 1 => x`
    DivOne,
    /// `1 / (a / b) => b / a`
    DivReciprocal,
}

impl Rule {
    /// Every rule, highest priority first.
    pub const ALL: [Self; 7] = [
        Self::AddZeroLeft,
        Self::AddZeroRight,
        Self::SubZero,
        Self::MulOneLeft,
        Self::MulOneRight,
        Self::DivOne,
        Self::DivReciprocal,
    ];

    /// Short rule name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AddZeroLeft => "add-zero-l",
            Self::AddZeroRight => "add-zero-r",
            Self::SubZero => "sub-zero",
            Self::MulOneLeft => "mul-one-l",
            Self::MulOneRight => "mul-one-r",
            Self::DivOne => "div-one",
            Self::DivReciprocal => "div-reciprocal",
        }
    }

    /// Operator of the nodes this rule rewrites.
    #[must_use]
    pub const fn op(self) -> BinOp {
        match self {
            Self::AddZeroLeft | Self::AddZeroRight => BinOp::Add,
            Self::SubZero => BinOp::Sub,
            Self::MulOneLeft | Self::MulOneRight => BinOp::Mul,
            Self::DivOne | Self::DivReciprocal => BinOp::Div,
        }
    }

    /// Returns true if the rule matches `node`. Operands are evaluated.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors of the operands.
    pub fn matches(self, node: &mut Expr) -> Result<bool> {
        let Some((op, lhs, rhs)) = node.operands_mut() else {
            return Ok(false);
        };
        if op != self.op() {
            return Ok(false);
        }
        Ok(match self {
            Self::AddZeroLeft => lhs.evaluate()?.is_dimensionless_zero(),
            Self::AddZeroRight | Self::SubZero => rhs.evaluate()?.is_dimensionless_zero(),
            Self::MulOneLeft => lhs.evaluate()?.is_dimensionless_one(),
            Self::MulOneRight | Self::DivOne => rhs.evaluate()?.is_dimensionless_one(),
            Self::DivReciprocal => {
                rhs.op() == Some(BinOp::Div) && lhs.evaluate()?.is_dimensionless_one()
            }
        })
    }

    /// Rewrites `node` in place. The rule must match.
    pub fn apply(self, node: &mut Expr) {
        let Some((_, lhs, rhs)) = node.operands_mut() else {
            return;
        };
        let replacement = match self {
            Self::AddZeroLeft | Self::MulOneLeft => std::mem::take(rhs),
            Self::AddZeroRight | Self::SubZero | Self::MulOneRight | Self::DivOne => {
                std::mem::take(lhs)
            }
            Self::DivReciprocal => {
                let Some((_, a, b)) = rhs.operands_mut() else {
                    return;
                };
                std::mem::swap(a, b);
                rhs.mark_dirty();
                std::mem::take(rhs)
            }
        };
        *node = replacement;
    }
}

/// First rule in `rules` matching `node`.
///
/// # Errors
///
/// Propagates evaluation errors of the operands.
pub fn first_match(rules: &[Rule], node: &mut Expr) -> Result<Option<Rule>> {
    if node.size() <= 1 {
        return Ok(None);
    }
    for &rule in rules {
        if rule.matches(node)? {
            return Ok(Some(rule));
        }
    }
    Ok(None)
}
