//! Run fingerprints.
//!
//! A fingerprint names a search by its bounds and its constant set. Built-in
//! constants appear by name; user constants by their index in the set and
//! their value, so renaming a user constant does not change the fingerprint.

use std::fs;
use std::hash::Hasher;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use closedform::prelude::*;
use rustc_hash::FxHasher;

/// Descriptor and hash of one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fingerprint {
    pub descriptor: String,
    pub hash: String,
}

impl Fingerprint {
    /// Fingerprints a search over `constants` with the bounds in `config`.
    pub fn new(constants: &ConstantSet, config: &SearchConfig) -> Self {
        let digits = config.precision.digits() as usize;
        let mut descriptor = format!(
            "max_expr={},max_int={};",
            config.max_expr_size, config.max_int_constants
        );
        for (index, constant) in constants.iter().enumerate() {
            if index > 0 {
                descriptor.push(',');
            }
            if constant.is_builtin() {
                descriptor.push_str(constant.name());
            } else {
                let value = constant.value().format(digits);
                descriptor.push_str(&format!("%{index}={value}"));
            }
        }

        let mut hasher = FxHasher::default();
        hasher.write(descriptor.as_bytes());
        let hash = format!("{:016x}", hasher.finish());
        Self { descriptor, hash }
    }

    /// Writes the descriptor to `<dir>/<hash>`, creating `dir` if needed.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let path = dir.join(&self.hash);
        fs::write(&path, &self.descriptor)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}
