//! Named constants referenced by expression leaves.

use closedform_units::DimValue;

/// A named constant with a dimensioned value.
///
/// Constants are immutable once loaded and shared between leaves through
/// `Arc<NamedConstant>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedConstant {
    name: String,
    value: DimValue,
    builtin: bool,
}

impl NamedConstant {
    /// Creates a user-defined constant.
    #[must_use]
    pub fn new(name: impl Into<String>, value: DimValue) -> Self {
        Self {
            name: name.into(),
            value,
            builtin: false,
        }
    }

    /// Creates a built-in constant.
    #[must_use]
    pub fn builtin(name: impl Into<String>, value: DimValue) -> Self {
        Self {
            name: name.into(),
            value,
            builtin: true,
        }
    }

    /// The constant's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The constant's value.
    #[must_use]
    pub fn value(&self) -> &DimValue {
        &self.value
    }

    /// Whether the constant comes from the built-in catalog.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        self.builtin
    }
}
