pub mod content;
pub mod pack_include;
pub mod pack_options;
pub mod rename_compilation_options;
pub mod resources;

pub use content::MoveContent;
pub use pack_include::MovePackInclude;
pub use pack_options::MovePackOptions;
pub use rename_compilation_options::RenameCompilationOptions;
pub use resources::MoveResources;

pub(crate) const BUILD_OPTIONS: &str = "buildOptions";
pub(crate) const PACK_OPTIONS: &str = "packOptions";
pub(crate) const PUBLISH_OPTIONS: &str = "publishOptions";
