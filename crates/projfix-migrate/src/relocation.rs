use projfix_doc::{Node, Object, Placement, Result, pointer_segment};

/// Moves one root key into one or more destination groups.
///
/// Groups that do not exist yet are created where the source key sits. When a
/// single source fans out to several new groups they keep the order in which
/// they were requested, each one inserted after the previous.
pub(crate) struct Relocation<'k> {
    source: &'k str,
    cursor: &'k str,
}

impl<'k> Relocation<'k> {
    pub fn new(source: &'k str) -> Self {
        Self {
            source,
            cursor: source,
        }
    }

    /// Get or create the root-level group `name`.
    pub fn group<'r>(&mut self, root: &'r mut Object, name: &'k str) -> Result<&'r mut Object> {
        let created = !root.contains_key(name);
        let group = root.get_or_insert_object(name, Placement::After(self.cursor))?;
        if created {
            self.cursor = name;
        }
        Ok(group)
    }

    /// Drop the source key from the root.
    pub fn finish(self, root: &mut Object) -> Option<Node> {
        root.remove(self.source)
    }
}

/// Get or create `name` at the end of `group`, reporting errors under `group_name`.
pub(crate) fn subgroup<'r>(
    group: &'r mut Object,
    group_name: &str,
    name: &str,
) -> Result<&'r mut Object> {
    group
        .get_or_insert_object(name, Placement::End)
        .map_err(|e| e.within(&pointer_segment(group_name)))
}
