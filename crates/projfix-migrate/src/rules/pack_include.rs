use log::debug;
use projfix_doc::{Object, Result, pointer_segment};

use super::PACK_OPTIONS;
use crate::Rule;
use crate::relocation::{Relocation, subgroup};

const PACK_INCLUDE: &str = "packInclude";
const FILES: &str = "files";
const MAPPINGS: &str = "mappings";

/// Move `packInclude` to `packOptions.files.mappings`.
pub struct MovePackInclude;

impl Rule for MovePackInclude {
    fn name(&self) -> &'static str {
        "move-pack-include"
    }

    fn apply(&self, root: &mut Object) -> Result<bool> {
        let Some(value) = root.get(PACK_INCLUDE).cloned() else {
            return Ok(false);
        };

        let mut relocation = Relocation::new(PACK_INCLUDE);
        let pack_options = relocation.group(root, PACK_OPTIONS)?;
        subgroup(pack_options, PACK_OPTIONS, FILES)?
            .append(MAPPINGS, value)
            .map_err(|e| {
                e.within(&pointer_segment(FILES))
                    .within(&pointer_segment(PACK_OPTIONS))
            })?;
        relocation.finish(root);

        debug!("Moved '{PACK_INCLUDE}' to '{PACK_OPTIONS}.{FILES}.{MAPPINGS}'");
        Ok(true)
    }
}
