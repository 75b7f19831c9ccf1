use anyhow::Result;
use ignore::{DirEntry, WalkBuilder};
use log::debug;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub const DEFAULT_MANIFEST_NAME: &str = "project.json";

#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// File name to match exactly, e.g. `project.json`
    pub file_name: String,
    /// Skip hidden files and directories
    pub skip_hidden: bool,
    /// Honour `.gitignore` / `.ignore` files
    pub respect_ignores: bool,
    /// Prune `vendor/` directories
    pub skip_vendor: bool,
}

impl Default for WalkOptions {
    /// Every file named `project.json` anywhere below the root.
    fn default() -> Self {
        Self {
            file_name: DEFAULT_MANIFEST_NAME.to_string(),
            skip_hidden: false,
            respect_ignores: false,
            skip_vendor: false,
        }
    }
}

/// `filter_entry` predicate that prunes `vendor/` directories.
pub fn skip_vendor(entry: &DirEntry) -> bool {
    let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
    !(is_dir && entry.file_name() == OsStr::new("vendor"))
}

/// Walk `root` and call `processor` for every manifest file
///
/// Features:
/// - Always recursive traversal
/// - Nothing is pruned by default
/// - Optionally skips hidden entries, vendor/ directories and git ignore
///   patterns, inside or outside a git repo
pub fn walk_manifests<F>(root: &Path, options: &WalkOptions, mut processor: F) -> Result<usize>
where
    F: FnMut(&Path) -> Result<()>,
{
    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(options.skip_hidden)
        .ignore(options.respect_ignores)
        .git_ignore(options.respect_ignores)
        .git_exclude(options.respect_ignores)
        .git_global(options.respect_ignores)
        .parents(options.respect_ignores)
        .require_git(false);
    if options.skip_vendor {
        builder.filter_entry(skip_vendor);
    }

    let file_name = OsStr::new(&options.file_name);
    let mut found_files = 0;

    for result in builder.build() {
        let entry = result?;
        let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
        if is_file && entry.file_name() == file_name {
            debug!("Found manifest: {}", entry.path().display());
            processor(entry.path())?;
            found_files += 1;
        }
    }

    Ok(found_files)
}

/// Walk `root` and collect manifest paths, sorted for deterministic processing.
pub fn collect_manifests(root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>> {
    let mut manifests = Vec::new();
    walk_manifests(root, options, |path| {
        manifests.push(path.to_path_buf());
        Ok(())
    })?;
    manifests.sort();
    Ok(manifests)
}
