mod rewrite;
mod scanner;

pub use rewrite::rewrite_ordinal_params;

use scanner::Lexing;

/// Whether `sql` contains an ordinal `?` placeholder.
///
/// Question marks inside quoted strings, quoted identifiers, comments, and dollar-quoted
/// blocks do not count. Ordinal binding is unsupported, so the execution path rejects
/// any statement for which this returns `true`.
///
/// Engines disagree on backslash escapes and nested comments, so the text is read both
/// ways and a `?` outside literals under either reading counts.
#[must_use]
pub fn has_ordinal_placeholder(sql: &str) -> bool {
    let bytes = sql.as_bytes();
    [Lexing::Standard, Lexing::Backslash]
        .into_iter()
        .any(|lexing| scanner::code_positions_with(sql, lexing).any(|idx| bytes[idx] == b'?'))
}
