//! Edit application engine.
//!
//! [`Engine`] drives whole documents; [`classify`] and [`apply_line`] are the
//! per-line stages it is built from.

pub mod classify;
pub mod driver;
pub mod report;
pub mod sequence;
pub mod store;

pub use classify::{classify, ClassifiedLine, SpanRevision};
pub use driver::{DocumentError, Engine};
pub use report::{DocumentReport, EditOutcome, LineReport};
pub use sequence::{apply_line, split_terminator, LineEdit};
pub use store::{Document, DocumentStore, FsStore, StoreError};
