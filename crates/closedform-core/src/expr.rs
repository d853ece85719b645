//! Expression trees.
//!
//! An [`Expr`] owns its children. Each node memoizes its value: evaluation
//! returns the cached value unless the node is dirty. Parent links are not
//! stored in nodes; see [`crate::parents::ParentIndex`].

use std::fmt;
use std::sync::Arc;

use closedform_units::{DimValue, Result};
use smallvec::SmallVec;

use crate::constant::NamedConstant;
use crate::id::NodeId;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
    /// Exponentiation.
    Pow,
}

impl BinOp {
    /// All operators.
    pub const ALL: [Self; 5] = [Self::Add, Self::Sub, Self::Mul, Self::Div, Self::Pow];

    /// Infix symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        }
    }

    /// Applies the operator to two values.
    ///
    /// # Errors
    ///
    /// Propagates the dimension and domain errors of the operation.
    pub fn apply(self, lhs: &DimValue, rhs: &DimValue) -> Result<DimValue> {
        match self {
            Self::Add => lhs.add(rhs),
            Self::Sub => lhs.sub(rhs),
            Self::Mul => lhs.mul(rhs),
            Self::Div => lhs.div(rhs),
            Self::Pow => lhs.pow(rhs),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The variant of a node, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A literal value.
    Literal,
    /// A reference to a named constant.
    Constant,
    /// A binary operation.
    Binary(BinOp),
}

/// Node payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A literal value.
    Literal(DimValue),
    /// A reference to a shared named constant.
    Constant(Arc<NamedConstant>),
    /// A binary operation owning both operands.
    Binary {
        /// The operator.
        op: BinOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
}

impl Default for ExprKind {
    fn default() -> Self {
        Self::Literal(DimValue::default())
    }
}

/// An expression node.
///
/// Equality is structural: identities and caches are ignored.
#[derive(Debug)]
pub struct Expr {
    id: NodeId,
    kind: ExprKind,
    cache: Option<DimValue>,
    dirty: bool,
}

impl Expr {
    /// Creates a node with a fresh identity. New nodes start dirty.
    #[must_use]
    pub fn new(kind: ExprKind) -> Self {
        Self {
            id: NodeId::fresh(),
            kind,
            cache: None,
            dirty: true,
        }
    }

    /// Creates a literal leaf.
    #[must_use]
    pub fn literal(value: DimValue) -> Self {
        Self::new(ExprKind::Literal(value))
    }

    /// Creates a constant leaf.
    #[must_use]
    pub fn constant(constant: Arc<NamedConstant>) -> Self {
        Self::new(ExprKind::Constant(constant))
    }

    /// Creates a binary node.
    #[must_use]
    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Self::new(ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    /// The node's identity.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's payload.
    #[must_use]
    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// Mutable access to the payload. Marks this node dirty.
    pub fn kind_mut(&mut self) -> &mut ExprKind {
        self.dirty = true;
        &mut self.kind
    }

    /// Consumes the node, returning its payload.
    #[must_use]
    pub fn into_kind(self) -> ExprKind {
        self.kind
    }

    /// The variant of this node.
    #[must_use]
    pub fn node_kind(&self) -> NodeKind {
        match &self.kind {
            ExprKind::Literal(_) => NodeKind::Literal,
            ExprKind::Constant(_) => NodeKind::Constant,
            ExprKind::Binary { op, .. } => NodeKind::Binary(*op),
        }
    }

    /// Returns the operator if this is a binary node.
    #[must_use]
    pub fn op(&self) -> Option<BinOp> {
        match &self.kind {
            ExprKind::Binary { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// Operator and operands of a binary node.
    #[must_use]
    pub fn operands(&self) -> Option<(BinOp, &Expr, &Expr)> {
        match &self.kind {
            ExprKind::Binary { op, lhs, rhs } => Some((*op, &**lhs, &**rhs)),
            _ => None,
        }
    }

    /// Operator and mutable operands of a binary node.
    ///
    /// Unlike [`Expr::kind_mut`] this does not mark the node dirty; callers
    /// that restructure the operands must do so themselves.
    pub fn operands_mut(&mut self) -> Option<(BinOp, &mut Expr, &mut Expr)> {
        match &mut self.kind {
            ExprKind::Binary { op, lhs, rhs } => Some((*op, &mut **lhs, &mut **rhs)),
            _ => None,
        }
    }

    /// Direct children, left to right.
    #[must_use]
    pub fn children(&self) -> SmallVec<[&Expr; 2]> {
        match &self.kind {
            ExprKind::Binary { lhs, rhs, .. } => smallvec::smallvec![&**lhs, &**rhs],
            _ => SmallVec::new(),
        }
    }

    /// Mutable direct children, left to right.
    pub fn children_mut(&mut self) -> SmallVec<[&mut Expr; 2]> {
        match &mut self.kind {
            ExprKind::Binary { lhs, rhs, .. } => smallvec::smallvec![&mut **lhs, &mut **rhs],
            _ => SmallVec::new(),
        }
    }

    /// Number of nodes in the tree. Not cached.
    #[must_use]
    pub fn size(&self) -> usize {
        match &self.kind {
            ExprKind::Binary { lhs, rhs, .. } => 1 + lhs.size() + rhs.size(),
            _ => 1,
        }
    }

    /// Returns true if the cached value must be recomputed.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks this node dirty.
    ///
    /// Ancestors are not reachable from a node; invalidate them through
    /// [`crate::parents::ParentIndex::invalidate`].
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// The cached value, if the node is clean.
    #[must_use]
    pub fn cached(&self) -> Option<&DimValue> {
        if self.dirty {
            None
        } else {
            self.cache.as_ref()
        }
    }

    /// Evaluates the node, reusing the cached value unless dirty.
    ///
    /// # Errors
    ///
    /// Propagates the first dimension or domain error raised by an
    /// operation in the tree.
    pub fn evaluate(&mut self) -> Result<&DimValue> {
        let value = match self.cache.take() {
            Some(value) if !self.dirty => value,
            _ => self.compute()?,
        };
        self.dirty = false;
        Ok(self.cache.insert(value))
    }

    fn compute(&mut self) -> Result<DimValue> {
        match &mut self.kind {
            ExprKind::Literal(value) => Ok(value.clone()),
            ExprKind::Constant(constant) => Ok(constant.value().clone()),
            ExprKind::Binary { op, lhs, rhs } => {
                let op = *op;
                let lhs = lhs.evaluate()?;
                let rhs = rhs.evaluate()?;
                op.apply(lhs, rhs)
            }
        }
    }

    /// Finds the node with identity `id`.
    #[must_use]
    pub fn find(&self, id: NodeId) -> Option<&Expr> {
        if self.id == id {
            return Some(self);
        }
        self.children().into_iter().find_map(|child| child.find(id))
    }

    /// Finds the node with identity `id` for mutation.
    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut Expr> {
        if self.id == id {
            return Some(self);
        }
        self.children_mut()
            .into_iter()
            .find_map(|child| child.find_mut(id))
    }

    /// Replaces the value of the literal leaf `id` and marks it and every
    /// ancestor on the path from `self` dirty.
    ///
    /// Returns false, changing nothing, if `id` is not a literal in this tree.
    pub fn redefine(&mut self, id: NodeId, value: DimValue) -> bool {
        if self.id == id {
            return match &mut self.kind {
                ExprKind::Literal(slot) => {
                    *slot = value;
                    self.dirty = true;
                    true
                }
                _ => false,
            };
        }
        let ExprKind::Binary { lhs, rhs, .. } = &mut self.kind else {
            return false;
        };
        let found = if lhs.find(id).is_some() {
            lhs.redefine(id, value)
        } else {
            rhs.redefine(id, value)
        };
        if found {
            self.dirty = true;
        }
        found
    }
}

impl Default for Expr {
    fn default() -> Self {
        Self::new(ExprKind::default())
    }
}

/// Clones the tree with fresh identities for every node.
impl Clone for Expr {
    fn clone(&self) -> Self {
        Self {
            id: NodeId::fresh(),
            kind: self.kind.clone(),
            cache: self.cache.clone(),
            dirty: self.dirty,
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

/// Fully parenthesized infix notation, e.g. `((pi * 2) + 1)`.
///
/// The formatter's precision selects the significant digits of literals.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(value) => fmt::Display::fmt(value, f),
            ExprKind::Constant(constant) => f.write_str(constant.name()),
            ExprKind::Binary { op, lhs, rhs } => {
                f.write_str("(")?;
                fmt::Display::fmt(lhs, f)?;
                write!(f, " {op} ")?;
                fmt::Display::fmt(rhs, f)?;
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use closedform_units::{Error, Precision};

    fn num(text: &str) -> Expr {
        Expr::literal(DimValue::parse(text, Precision::new(20)).unwrap())
    }

    fn constant(name: &str, text: &str) -> Expr {
        let value = DimValue::parse(text, Precision::new(20)).unwrap();
        Expr::constant(Arc::new(NamedConstant::new(name, value)))
    }

    fn value(text: &str) -> DimValue {
        DimValue::parse(text, Precision::new(20)).unwrap()
    }

    #[test]
    fn test_evaluate_binary() {
        let mut e = Expr::binary(BinOp::Mul, constant("pi", "3.14159"), num("2"));
        assert_eq!(e.evaluate().unwrap(), &value("6.28318"));
    }

    #[test]
    fn test_evaluate_caches() {
        let mut e = Expr::binary(BinOp::Add, num("1"), num("2"));
        assert!(e.is_dirty());
        assert!(e.cached().is_none());
        e.evaluate().unwrap();
        assert!(!e.is_dirty());
        assert_eq!(e.cached(), Some(&value("3")));
        e.mark_dirty();
        assert!(e.cached().is_none());
        assert_eq!(e.evaluate().unwrap(), &value("3"));
    }

    #[test]
    fn test_evaluate_propagates_errors() {
        let mut e = Expr::binary(
            BinOp::Mul,
            num("2"),
            Expr::binary(BinOp::Add, num("1 m"), num("1 s")),
        );
        assert!(matches!(
            e.evaluate(),
            Err(Error::DimensionMismatch { .. })
        ));
        let mut e = Expr::binary(BinOp::Pow, num("2"), num("1 kg"));
        assert!(matches!(
            e.evaluate(),
            Err(Error::NonDimensionlessExponent(_))
        ));
    }

    #[test]
    fn test_display() {
        let e = Expr::binary(
            BinOp::Add,
            Expr::binary(BinOp::Mul, constant("pi", "3.14159"), num("2")),
            num("1"),
        );
        assert_eq!(e.to_string(), "((pi * 2) + 1)");
        assert_eq!(num("2.5 m").to_string(), "2.5 m");
        assert_eq!(format!("{:.2}", num("3.14159")), "3.1");
    }

    #[test]
    fn test_size_and_kind() {
        let e = Expr::binary(
            BinOp::Div,
            num("1"),
            Expr::binary(BinOp::Pow, num("2"), num("3")),
        );
        assert_eq!(e.size(), 5);
        assert_eq!(e.node_kind(), NodeKind::Binary(BinOp::Div));
        assert_eq!(e.children()[0].node_kind(), NodeKind::Literal);
        assert_eq!(constant("e", "2.718").node_kind(), NodeKind::Constant);
    }

    #[test]
    fn test_structural_equality_ignores_identity() {
        let a = Expr::binary(BinOp::Sub, num("3"), constant("c", "1 m"));
        let mut b = a.clone();
        assert_ne!(a.id(), b.id());
        b.evaluate().ok();
        assert_eq!(a, b);
        let c = Expr::binary(BinOp::Add, num("3"), constant("c", "1 m"));
        assert_ne!(a, c);
    }

    #[test]
    fn test_clone_allocates_fresh_ids() {
        let a = Expr::binary(BinOp::Add, num("1"), num("2"));
        let b = a.clone();
        assert_ne!(a.children()[0].id(), b.children()[0].id());
        assert_ne!(a.children()[1].id(), b.children()[1].id());
    }

    #[test]
    fn test_redefine_invalidates_path() {
        let leaf = num("2");
        let leaf_id = leaf.id();
        let mut e = Expr::binary(
            BinOp::Mul,
            Expr::binary(BinOp::Add, num("1"), leaf),
            num("10"),
        );
        assert_eq!(e.evaluate().unwrap(), &value("30"));

        assert!(e.redefine(leaf_id, value("4")));
        assert!(e.is_dirty());
        assert!(!e.children()[1].is_dirty());
        assert_eq!(e.evaluate().unwrap(), &value("50"));
    }

    #[test]
    fn test_redefine_rejects_non_literals() {
        let mut e = Expr::binary(BinOp::Add, num("1"), constant("pi", "3.14"));
        let root_id = e.id();
        let constant_id = e.children()[1].id();
        assert!(!e.redefine(root_id, value("5")));
        assert!(!e.redefine(constant_id, value("5")));
        assert!(!e.redefine(NodeId::fresh(), value("5")));
    }

    #[test]
    fn test_find() {
        let e = Expr::binary(BinOp::Add, num("1"), num("2"));
        let rhs = e.children()[1].id();
        assert_eq!(e.find(rhs).map(Expr::size), Some(1));
        assert!(e.find(NodeId::fresh()).is_none());
    }
}
