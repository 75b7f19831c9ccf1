use log::debug;
use projfix_doc::{Object, Result};

use super::{BUILD_OPTIONS, PUBLISH_OPTIONS};
use crate::Rule;
use crate::relocation::{Relocation, subgroup};

const COPY_TO_OUTPUT: &str = "copyToOutput";

/// Legacy content keys and the field each becomes in its new homes.
const CONTENT_KEYS: [(&str, &str); 3] = [
    ("content", "include"),
    ("contentExclude", "exclude"),
    ("contentFiles", "includeFiles"),
];

/// Mirror each legacy content key into `publishOptions` and
/// `buildOptions.copyToOutput`, then drop it.
pub struct MoveContent;

impl Rule for MoveContent {
    fn name(&self) -> &'static str {
        "move-content"
    }

    fn apply(&self, root: &mut Object) -> Result<bool> {
        let mut changed = false;

        for (source, field) in CONTENT_KEYS {
            let Some(value) = root.get(source).cloned() else {
                continue;
            };

            let mut relocation = Relocation::new(source);
            relocation
                .group(root, PUBLISH_OPTIONS)?
                .insert(field, value.clone());
            let build_options = relocation.group(root, BUILD_OPTIONS)?;
            subgroup(build_options, BUILD_OPTIONS, COPY_TO_OUTPUT)?.insert(field, value);
            relocation.finish(root);

            debug!(
                "Moved '{source}' to '{PUBLISH_OPTIONS}.{field}' and '{BUILD_OPTIONS}.{COPY_TO_OUTPUT}.{field}'"
            );
            changed = true;
        }

        Ok(changed)
    }
}
