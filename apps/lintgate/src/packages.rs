//! Top-level package discovery.
//!
//! Mirrors what the packaging metadata hands the gate: directories holding
//! an `__init__.py`, or, when there are none, top-level `*.py` modules.
//! Only names without a `.` separator are kept.

use glob::glob;
use std::collections::BTreeSet;
use std::path::Path;

/// Ordered set of top-level package names. Order is the processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSet {
    names: Vec<String>,
}

impl PackageSet {
    /// Keep top-level names only, preserving the given order and dropping
    /// duplicates.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let names = names
            .into_iter()
            .map(Into::into)
            .filter(|n: &String| is_top_level(n))
            .filter(|n| seen.insert(n.clone()))
            .collect();
        PackageSet { names }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A top-level package is a non-empty name with no `.` separator.
pub fn is_top_level(name: &str) -> bool {
    !name.is_empty() && !name.contains('.')
}

/// Discover the package set under `root`.
pub fn discover(root: &Path) -> PackageSet {
    let pkgs = glob_names(root, "*/__init__.py", |p| {
        p.parent()
            .and_then(|d| d.file_name())
            .map(|s| s.to_string_lossy().to_string())
    });
    if !pkgs.is_empty() {
        return PackageSet::from_names(pkgs);
    }
    let modules = glob_names(root, "*.py", |p| {
        p.file_stem().map(|s| s.to_string_lossy().to_string())
    })
    .into_iter()
    .filter(|m| m != "setup");
    PackageSet::from_names(modules)
}

/// Resolve the package set: explicit names win, then configured names, then
/// discovery.
pub fn resolve(root: &Path, cli: &[String], configured: Option<&[String]>) -> PackageSet {
    if !cli.is_empty() {
        return PackageSet::from_names(cli.iter().cloned());
    }
    if let Some(names) = configured {
        return PackageSet::from_names(names.iter().cloned());
    }
    discover(root)
}

fn glob_names<F>(root: &Path, pattern: &str, name_of: F) -> Vec<String>
where
    F: Fn(&Path) -> Option<String>,
{
    let escaped = glob::Pattern::escape(&root.to_string_lossy());
    let full = format!("{}/{}", escaped, pattern);
    let mut out: BTreeSet<String> = BTreeSet::new();
    if let Ok(entries) = glob(&full) {
        for p in entries.flatten() {
            if let Some(n) = name_of(&p) {
                out.insert(n);
            }
        }
    }
    out.into_iter().collect()
}
