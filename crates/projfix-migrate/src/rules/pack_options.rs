use log::debug;
use projfix_doc::{Object, Result, pointer_segment};

use super::PACK_OPTIONS;
use crate::Rule;
use crate::relocation::Relocation;

/// Root keys that belong in `packOptions`, in the order they are appended there.
const PACK_OPTION_KEYS: [&str; 3] = ["repository", "tags", "licenseUrl"];

/// Move `repository`, `tags` and `licenseUrl` into `packOptions`.
pub struct MovePackOptions;

impl Rule for MovePackOptions {
    fn name(&self) -> &'static str {
        "move-pack-options"
    }

    fn apply(&self, root: &mut Object) -> Result<bool> {
        let mut changed = false;

        for key in PACK_OPTION_KEYS {
            let Some(value) = root.get(key).cloned() else {
                continue;
            };

            let mut relocation = Relocation::new(key);
            relocation
                .group(root, PACK_OPTIONS)?
                .append(key, value)
                .map_err(|e| e.within(&pointer_segment(PACK_OPTIONS)))?;
            relocation.finish(root);

            debug!("Moved '{key}' to '{PACK_OPTIONS}'");
            changed = true;
        }

        Ok(changed)
    }
}
