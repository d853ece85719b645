//! The constants file format.
//!
//! One entry per line:
//!
//! ```text
//! # built-ins are selected by name
//! pi
//! euler
//! # anything else needs a value, optionally with a unit
//! me = 9.109e-31 kg
//! c  = 299792458 m/s
//! ```
//!
//! Blank lines and `#` comments are skipped. Malformed lines are skipped
//! with a warning; defining a name twice, or giving a built-in a value, is
//! an error.

use std::fs;
use std::path::Path;

use closedform_core::NamedConstant;
use closedform_units::{DimValue, Precision};
use tracing::{debug, warn};

use crate::builtin::Builtin;
use crate::error::{Error, Result};
use crate::set::ConstantSet;

/// File name looked up when no constants file is given.
pub const DEFAULT_CONSTANTS_FILE: &str = "constants.conf";

/// Parses constants file text.
///
/// # Errors
///
/// Returns [`Error::DuplicateConstantName`] when a name is defined twice and
/// [`Error::RedefinedBuiltin`] when a built-in name is given a value.
pub fn parse(text: &str, precision: Precision) -> Result<ConstantSet> {
    let mut set = ConstantSet::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = content.split('=').map(str::trim).collect();
        if let [name] = tokens.as_slice() {
            let name: String = name.split_whitespace().collect();
            match Builtin::from_name(&name) {
                Some(builtin) => {
                    debug!(line, name = builtin.name(), "selected built-in constant");
                    set.push(builtin.constant(precision))?;
                }
                None => warn!(
                    line,
                    name = %name,
                    builtins = ?Builtin::ALL.map(Builtin::name),
                    "not a built-in constant; a definition looks like `{name} = 1.0 s`, skipping"
                ),
            }
            continue;
        }

        if tokens.len() > 2 {
            warn!(line, tokens = tokens.len(), "more than one '=', using the first two tokens");
        }
        let name: String = tokens[0].split_whitespace().collect();
        let value = tokens[1];
        if name.is_empty() || value.is_empty() {
            warn!(line, "empty name or value, skipping");
            continue;
        }

        if Builtin::from_name(&name).is_some() {
            return Err(Error::RedefinedBuiltin { name, line });
        }
        let value = match DimValue::parse(value, precision) {
            Ok(value) => value,
            Err(err) => {
                warn!(line, name = %name, error = %err, "invalid constant value, skipping");
                continue;
            }
        };

        debug!(line, name = %name, value = %value, "defined constant");
        set.push(NamedConstant::new(name, value))?;
    }

    Ok(set)
}

/// Reads and parses the constants file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or any error of
/// [`parse`].
pub fn load(path: impl AsRef<Path>, precision: Precision) -> Result<ConstantSet> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let set = parse(&text, precision)?;
    debug!(path = %path.display(), constants = set.len(), "loaded constants file");
    Ok(set)
}
