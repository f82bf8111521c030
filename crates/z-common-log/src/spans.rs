//! Tracing spans.

use tracing::{info_span, Span};

/// Create a span for an operation on a single K.
pub fn k_span(k_id: &str) -> Span {
    info_span!("k", id = %k_id)
}

/// Create a span for an operation inside a note directory.
pub fn note_span(dir: &str) -> Span {
    info_span!("note", dir = %dir)
}

/// Create a span for an external program invocation.
pub fn command_span(program: &str) -> Span {
    info_span!("command", program = %program)
}
