pub mod document;
pub mod scanner;
pub mod schema;
pub mod sink;
pub mod workspace;

pub use document::{ContentKind, Document, Position, SourceRange};
pub use scanner::{Diagnostic, Scanner, maybe_scan, scan};
pub use schema::{CommandDef, CommandSchema, SchemaError};
pub use sink::DiagnosticSink;
pub use workspace::Workspace;
