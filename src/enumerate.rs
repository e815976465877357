//! Finds the modules to publish below the root directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::Module;
use crate::error::{PushError, Result};

/// Canonicalize the root path; it must be an existing directory.
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    let resolved = root.canonicalize().map_err(|e| {
        PushError::config(format!("Root path {} cannot be resolved: {}", root.display(), e))
    })?;

    if !resolved.is_dir() {
        return Err(PushError::config(format!(
            "Root path {} is not a directory",
            resolved.display()
        )));
    }

    Ok(resolved)
}

/// Modules to process, in processing order.
///
/// A non-empty `only` list is returned verbatim. Otherwise every immediate
/// subdirectory of `root` is a module, hidden directories excepted, sorted by
/// name so runs are reproducible.
pub fn list_modules(root: &Path, only: &[String]) -> Result<Vec<Module>> {
    if !only.is_empty() {
        debug!(modules = ?only, "using explicit module list");
        return Ok(only.iter().map(Module::new).collect());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        names.push(name);
    }
    names.sort();

    debug!(root = %root.display(), modules = ?names, "enumerated modules");
    Ok(names.into_iter().map(Module::new).collect())
}
