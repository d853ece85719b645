//! Ordered, name-unique collections of constants.

use std::sync::Arc;

use closedform_core::NamedConstant;
use closedform_units::Precision;

use crate::builtin::Builtin;
use crate::error::{Error, Result};

/// The constants available to a search, in load order.
///
/// Names are unique. Constants are shared through `Arc` so every leaf that
/// references one points at the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantSet {
    constants: Vec<Arc<NamedConstant>>,
}

impl ConstantSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The full built-in catalog at `precision`.
    #[must_use]
    pub fn builtins(precision: Precision) -> Self {
        Self {
            constants: Builtin::ALL
                .into_iter()
                .map(|b| Arc::new(b.constant(precision)))
                .collect(),
        }
    }

    /// Builds a set from `constants`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateConstantName`] if two constants share a name.
    pub fn from_constants<I>(constants: I) -> Result<Self>
    where
        I: IntoIterator<Item = NamedConstant>,
    {
        let mut set = Self::new();
        for constant in constants {
            set.push(constant)?;
        }
        Ok(set)
    }

    /// Appends `constant`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateConstantName`] if the name is taken.
    pub fn push(&mut self, constant: NamedConstant) -> Result<()> {
        if self.get(constant.name()).is_some() {
            return Err(Error::DuplicateConstantName(constant.name().to_string()));
        }
        self.constants.push(Arc::new(constant));
        Ok(())
    }

    /// Looks up a constant by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<NamedConstant>> {
        self.constants.iter().find(|c| c.name() == name)
    }

    /// Position of the named constant in load order.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.constants.iter().position(|c| c.name() == name)
    }

    /// Iterates in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<NamedConstant>> {
        self.constants.iter()
    }

    /// Number of constants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constants.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }

    /// Names in load order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constants.iter().map(|c| c.name())
    }

    /// The constants as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Arc<NamedConstant>] {
        &self.constants
    }
}

impl<'a> IntoIterator for &'a ConstantSet {
    type Item = &'a Arc<NamedConstant>;
    type IntoIter = std::slice::Iter<'a, Arc<NamedConstant>>;

    fn into_iter(self) -> Self::IntoIter {
        self.constants.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use closedform_units::DimValue;

    fn constant(name: &str, text: &str) -> NamedConstant {
        NamedConstant::new(name, DimValue::parse(text, Precision::default()).unwrap())
    }

    #[test]
    fn test_builtins_in_catalog_order() {
        let set = ConstantSet::builtins(Precision::default());
        let names: Vec<_> = set.names().collect();
        assert_eq!(
            names,
            ["pi", "e", "euler", "ln2", "catalan", "phi", "fine-structure"]
        );
    }

    #[test]
    fn test_push_rejects_duplicates() {
        let mut set = ConstantSet::new();
        set.push(constant("me", "9.109e-31 kg")).unwrap();
        let err = set.push(constant("me", "1")).unwrap_err();
        assert!(matches!(err, Error::DuplicateConstantName(name) if name == "me"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_from_constants() {
        let set = ConstantSet::from_constants([
            constant("c", "299792458 m/s"),
            constant("h", "6.62607015e-34 J*s"),
        ])
        .unwrap();
        assert_eq!(set.index_of("h"), Some(1));
        assert!(set.get("c").is_some_and(|c| !c.value().is_dimensionless()));
        assert!(set.get("G").is_none());
    }

    #[test]
    fn test_shared_values() {
        let set = ConstantSet::builtins(Precision::default());
        let copy = set.clone();
        assert!(Arc::ptr_eq(&set.as_slice()[0], &copy.as_slice()[0]));
    }
}
