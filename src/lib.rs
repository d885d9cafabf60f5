pub mod assemble;
pub mod cli;
pub mod constants;
pub mod date_macro;
pub mod edit;
pub mod error;
pub mod heading;
pub mod link;
pub mod logging;
pub mod naming;
pub mod placeholder;
pub mod refactor;
pub mod settings;
pub mod split;
pub mod template;
pub mod util;
pub mod vault;

pub use cli::{Cli, Command, NameFrom};
pub use edit::{apply_edits, line_range, Document, EditError, EditOp};
pub use error::{RefactorError, Result};
pub use link::{LinkRenderer, LinkStyle};
pub use naming::{NameAllocator, UniqueNames};
pub use placeholder::{Placeholder, PlaceholderValues};
pub use refactor::{CurrentNote, Naming, NewNote, Refactor, RefactorPlan, Scope};
pub use settings::{default_config_path, Settings};
pub use util::{display_path, secure_path};
pub use vault::FsVault;
