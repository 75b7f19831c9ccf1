use log::debug;
use projfix_doc::{DocError, Node, Object, Result, pointer_segment};

use super::BUILD_OPTIONS;
use crate::Rule;

const COMPILATION_OPTIONS: &str = "compilationOptions";
const FRAMEWORKS: &str = "frameworks";

/// Rename `compilationOptions` to `buildOptions` at the root and inside every
/// `frameworks` entry, keeping its position.
pub struct RenameCompilationOptions;

impl Rule for RenameCompilationOptions {
    fn name(&self) -> &'static str {
        "rename-compilation-options"
    }

    fn apply(&self, root: &mut Object) -> Result<bool> {
        let mut changed = root.rename(COMPILATION_OPTIONS, BUILD_OPTIONS)?;
        if changed {
            debug!("Renamed '{COMPILATION_OPTIONS}' to '{BUILD_OPTIONS}'");
        }

        // Manifests that target a single framework have no `frameworks` section
        let Some(frameworks) = root.object_mut(FRAMEWORKS)? else {
            return Ok(changed);
        };

        for (moniker, framework) in frameworks.iter_mut() {
            match framework {
                Node::Object(framework) => {
                    let renamed = framework
                        .rename(COMPILATION_OPTIONS, BUILD_OPTIONS)
                        .map_err(|e| {
                            e.within(&pointer_segment(moniker))
                                .within(&pointer_segment(FRAMEWORKS))
                        })?;
                    if renamed {
                        debug!("Renamed '{COMPILATION_OPTIONS}' in framework '{moniker}'");
                        changed = true;
                    }
                }
                other => {
                    return Err(DocError::schema(
                        format!("{}{}", pointer_segment(FRAMEWORKS), pointer_segment(moniker)),
                        "object",
                        other.kind_name(),
                    ));
                }
            }
        }

        Ok(changed)
    }
}
