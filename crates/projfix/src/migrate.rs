use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use log::debug;
use projfix_migrate::Migrator;
use similar::TextDiff;
use std::fs;
use std::path::{Path, PathBuf};

use crate::file_walker::{self, DEFAULT_MANIFEST_NAME, WalkOptions};

/// Arguments for migrating a directory tree
#[derive(Args, Debug, Clone)]
pub struct MigrateArgs {
    /// Directory to search recursively for manifests
    #[arg(value_name = "ROOT", value_hint = clap::ValueHint::DirPath)]
    pub root: PathBuf,

    /// Do not write anything; exit with non-zero code if any manifest needs migration
    #[arg(long)]
    pub check: bool,

    /// Show diffs instead of writing files
    #[arg(long)]
    pub diff: bool,

    /// Name of the manifest files to migrate
    #[arg(long, value_name = "NAME", default_value = DEFAULT_MANIFEST_NAME)]
    pub file_name: String,

    /// Skip hidden files and directories
    #[arg(long)]
    pub skip_hidden: bool,

    /// Skip paths matched by .gitignore and .ignore files
    #[arg(long)]
    pub respect_ignores: bool,

    /// Skip vendor/ directories
    #[arg(long)]
    pub skip_vendor: bool,

    /// Report failing manifests and continue with the rest instead of stopping
    #[arg(long)]
    pub keep_going: bool,
}

impl MigrateArgs {
    fn dry_run(&self) -> bool {
        self.check || self.diff
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Unchanged,
    Migrated,
    /// Needs migration but nothing was written
    Pending,
}

#[derive(Debug, Default)]
struct Summary {
    migrated: usize,
    pending: usize,
    failed: usize,
}

/// Execute the migration over `args.root`
pub fn execute(args: MigrateArgs) -> Result<()> {
    if !args.root.is_dir() {
        anyhow::bail!("{} is not a directory", args.root.display());
    }

    let options = WalkOptions {
        file_name: args.file_name.clone(),
        skip_hidden: args.skip_hidden,
        respect_ignores: args.respect_ignores,
        skip_vendor: args.skip_vendor,
    };
    let manifests = file_walker::collect_manifests(&args.root, &options)?;
    if manifests.is_empty() {
        eprintln!(
            "No {} files found under {}",
            args.file_name,
            args.root.display()
        );
        return Ok(());
    }
    debug!("Found {} manifests", manifests.len());

    let migrator = Migrator::new();
    let mut summary = Summary::default();

    for path in &manifests {
        let display = display_path(&args.root, path);
        match migrate_file(&migrator, path, &args) {
            Ok(Outcome::Unchanged) => {
                debug!("{display}: nothing to migrate");
            }
            Ok(Outcome::Migrated) => {
                summary.migrated += 1;
                eprintln!("{} {}", "✓".green(), display.green().bold());
            }
            Ok(Outcome::Pending) => {
                summary.pending += 1;
                eprintln!(
                    "{} {} (needs migration)",
                    "!".yellow(),
                    display.yellow().bold()
                );
            }
            Err(e) if args.keep_going => {
                summary.failed += 1;
                eprintln!("{} {}: {e:#}", "✗".red(), display.red().bold());
            }
            Err(e) => return Err(e),
        }
    }

    if summary.failed > 0 {
        anyhow::bail!(
            "Migrate failed with errors ({} of {} manifests)",
            summary.failed,
            manifests.len()
        );
    }

    if args.dry_run() {
        eprintln!(
            "{} of {} manifests need migration",
            summary.pending,
            manifests.len()
        );
        if args.check && summary.pending > 0 {
            anyhow::bail!("{} manifests need migration", summary.pending);
        }
    } else {
        eprintln!(
            "Migrated {} of {} manifests",
            summary.migrated,
            manifests.len()
        );
    }

    Ok(())
}

/// Migrate a single manifest, writing it back only when its text changes
fn migrate_file(migrator: &Migrator, path: &Path, args: &MigrateArgs) -> Result<Outcome> {
    let original = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let updated = migrator
        .migrate_source(&original)
        .with_context(|| format!("Failed to migrate {}", path.display()))?;

    let Some(updated) = updated.filter(|updated| *updated != original) else {
        return Ok(Outcome::Unchanged);
    };

    if args.diff {
        print!("{}", unified_diff(path, &original, &updated));
    }
    if args.dry_run() {
        return Ok(Outcome::Pending);
    }

    fs::write(path, updated).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(Outcome::Migrated)
}

fn unified_diff(path: &Path, original: &str, updated: &str) -> String {
    let diff = TextDiff::from_lines(original, updated);
    format!(
        "{}",
        diff.unified_diff().context_radius(3).header(
            &format!("old/{}", path.display()),
            &format!("new/{}", path.display())
        )
    )
}

fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
