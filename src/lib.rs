//! Vale Edit: apply Vale lint alerts as text edits
//!
//! Reads Vale's JSON output (document path to alerts) and rewrites each
//! document so the fixable alerts are resolved, keeping the line structure.
//!
//! # Architecture
//!
//! Every span-scoped fix compiles down to a single primitive,
//! [`edit::splice_with`]: rewrite the characters at one span of one line.
//! Per line, span edits run right to left by their original start offset so
//! no edit moves text another still addresses; line-wide edits (spacing,
//! trailing whitespace) follow in a fixed order, and the line terminator is
//! restored last.
//!
//! # Safety
//!
//! - Documents are overwritten in place with no backup
//! - Writes are atomic (tempfile + fsync + rename)
//! - Optional root boundary enforcement ([`RootGuard`])
//! - A bad alert skips only itself; a bad line or document skips only itself
//!
//! # Example
//!
//! ```no_run
//! use vale_edit::{Engine, Exceptions, FsStore, Registry, RevisionBatch};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let batch = RevisionBatch::load("vale_output.json")?;
//! let registry = Registry::default();
//! let exceptions = Exceptions::load_or_empty(".vale/styles/Google/Headings.yml");
//!
//! let engine = Engine::new(&registry, &exceptions);
//! for (path, result) in engine.apply_batch(&FsStore::new(), &batch) {
//!     match result {
//!         Ok(report) => println!("{}: {} edits applied", path.display(), report.applied()),
//!         Err(e) => eprintln!("{}: {}", path.display(), e),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod edit;
pub mod engine;
pub mod ops;
pub mod revision;
pub mod safety;

// Re-exports
pub use config::{
    load_from_path, load_from_str, ConfigError, EditKind, EditorConfig, Exceptions,
    ExceptionsError, GlobalKind, Registry, SpanKind,
};
pub use edit::{splice_with, EditError, Span, Splice};
pub use engine::{
    apply_line, classify, Document, DocumentError, DocumentReport, DocumentStore, EditOutcome,
    Engine, FsStore, LineReport, StoreError,
};
pub use revision::{Action, BatchError, Revision, RevisionBatch};
pub use safety::{RootGuard, SafetyError};
