//! Structural refactoring: carry proposed naming fixes into the source tree.
//!
//! The naming engine only proposes `(old, new)` pairs. A [`RenameDispatcher`]
//! applies them as one batch; [`TextRenamer`] is the built-in dispatcher for
//! hosts that have no semantic rename engine of their own.

mod rename;

pub use rename::{FileEdit, Reference, RenameDispatcher, RenameResult, TextRenamer};
