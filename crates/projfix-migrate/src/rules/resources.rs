use log::debug;
use projfix_doc::{Object, Result};

use super::BUILD_OPTIONS;
use crate::Rule;
use crate::relocation::{Relocation, subgroup};

const EMBED: &str = "embed";

const RESOURCE_KEYS: [(&str, &str); 2] = [("resource", "include"), ("namedResource", "mappings")];

/// Move `resource` and `namedResource` into `buildOptions.embed`.
pub struct MoveResources;

impl Rule for MoveResources {
    fn name(&self) -> &'static str {
        "move-resources"
    }

    fn apply(&self, root: &mut Object) -> Result<bool> {
        let mut changed = false;

        for (source, field) in RESOURCE_KEYS {
            let Some(value) = root.get(source).cloned() else {
                continue;
            };

            let mut relocation = Relocation::new(source);
            let build_options = relocation.group(root, BUILD_OPTIONS)?;
            subgroup(build_options, BUILD_OPTIONS, EMBED)?.insert(field, value);
            relocation.finish(root);

            debug!("Moved '{source}' to '{BUILD_OPTIONS}.{EMBED}.{field}'");
            changed = true;
        }

        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::apply;

    #[test]
    fn test_resources_embedded() {
        let (changed, out) = apply(
            &MoveResources,
            r#"{"resource":"Strings/*.resx","namedResource":{"App.Strings":"Strings/en.resx"},"version":"1"}"#,
        );
        assert!(changed);
        assert_eq!(
            out,
            r#"{"buildOptions":{"embed":{"include":"Strings/*.resx","mappings":{"App.Strings":"Strings/en.resx"}}},"version":"1"}"#
        );
    }

    #[test]
    fn test_partially_migrated_embed_is_overwritten() {
        let (_, out) = apply(
            &MoveResources,
            r#"{"buildOptions":{"embed":{"include":"old/*.resx","exclude":"x"}},"resource":"new/*.resx"}"#,
        );
        assert_eq!(
            out,
            r#"{"buildOptions":{"embed":{"include":"new/*.resx","exclude":"x"}}}"#
        );
    }

    #[test]
    fn test_absent() {
        let (changed, out) = apply(&MoveResources, r#"{"buildOptions":{}}"#);
        assert!(!changed);
        assert_eq!(out, r#"{"buildOptions":{}}"#);
    }
}
