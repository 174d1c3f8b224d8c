pub mod exceptions;
pub mod loader;
pub mod registry;
pub mod schema;

pub use exceptions::{Exceptions, ExceptionsError};
pub use loader::{load_from_path, load_from_str, ConfigError};
pub use registry::{Registry, DEFAULT_EXCEPTIONS_PATH};
pub use schema::{
    EditKind, EditorConfig, GlobalKind, SpanKind, ValidationError, ValidationIssue,
};
