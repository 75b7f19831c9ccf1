//! Migration of legacy `project.json` manifests to the current schema.
//!
//! A [`Migrator`] runs an ordered list of [`Rule`]s over a document. The order
//! is part of the contract: `compilationOptions` is renamed to `buildOptions`
//! first so that the later rules extend that group instead of creating a
//! second one, then pack options, pack include, content and resources are
//! moved in turn.

mod relocation;
pub mod rules;

use log::debug;
use projfix_doc::{Document, Object, Result};

pub use projfix_doc::DocError;
use rules::{
    MoveContent, MovePackInclude, MovePackOptions, MoveResources, RenameCompilationOptions,
};

/// One rewrite step over the root object of a manifest.
pub trait Rule {
    fn name(&self) -> &'static str;

    /// Rewrite `root` in place. Returns whether anything changed.
    fn apply(&self, root: &mut Object) -> Result<bool>;
}

/// The rules in the order they must run.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(RenameCompilationOptions),
        Box::new(MovePackOptions),
        Box::new(MovePackInclude),
        Box::new(MoveContent),
        Box::new(MoveResources),
    ]
}

pub struct Migrator {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for Migrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Migrator {
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name())
    }

    /// Run every rule over `root` and return the names of those that changed it.
    pub fn migrate_document(&self, root: &mut Object) -> Result<Vec<&'static str>> {
        let mut applied = Vec::new();
        for rule in &self.rules {
            if rule.apply(root)? {
                debug!("Applied rule {}", rule.name());
                applied.push(rule.name());
            }
        }
        Ok(applied)
    }

    /// Migrate manifest text.
    ///
    /// Returns `None` when no rule applies, so callers can leave the file alone
    /// even if its formatting differs from what the serializer would produce.
    pub fn migrate_source(&self, source: &str) -> Result<Option<String>> {
        let mut doc = Document::parse(source)?;
        let applied = self.migrate_document(doc.root_mut())?;
        if applied.is_empty() {
            return Ok(None);
        }
        doc.to_text().map(Some)
    }
}
