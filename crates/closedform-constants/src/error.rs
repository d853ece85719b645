//! Errors raised while building constant sets.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for constant set construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a constant set.
#[derive(Debug, Error)]
pub enum Error {
    /// Two constants share a name.
    #[error("constant '{0}' is defined more than once")]
    DuplicateConstantName(String),

    /// A constants file assigns a value to a built-in name.
    #[error("line {line}: '{name}' is a built-in constant and cannot be redefined")]
    RedefinedBuiltin {
        /// The built-in name.
        name: String,
        /// 1-based line number.
        line: usize,
    },

    /// The constants file could not be read.
    #[error("cannot read constants file '{}': {source}", .path.display())]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}
