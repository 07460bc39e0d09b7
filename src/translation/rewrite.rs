use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::scanner::{code_positions, scan_digits};
use crate::types::NamedValue;

// `<ident> <op> $N`, where op is one of =, <=, >=, <>, in, not in.
static ORDINAL_COMPARISON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?mi)(?P<ident>[a-z0-9_]+|"[a-z0-9_]+")\s*(?:<>|<=|>=|=|\bnot\s+in\b|\bin\b)\s*\(?\s*(?P<ordinal>\$\d+)"#,
    )
    .expect("ordinal comparison pattern is valid")
});

/// Rewrite `$N` placeholders used in comparisons into `@name` placeholders.
///
/// For each unnamed argument, the first comparison whose placeholder is `$<ordinal>`
/// names the argument after the compared column and every `$<ordinal>` token in
/// executable text becomes `@column`. Arguments that already have a name are left
/// alone; arguments with no matching comparison stay unnamed and will be rejected at
/// execution. Only the first unnamed argument claiming an ordinal is rewritten.
///
/// Comparisons inside literals and comments are ignored. A column name is handed out
/// at most once per call (names already on the arguments count as taken), so
/// `a = $1 OR a = $2` names only the first argument and leaves `$2` unnamed.
///
/// This is opt-in: the execution path never calls it.
///
/// ```rust
/// use rds_data_middleware::prelude::*;
///
/// let mut args = vec![NamedValue::positional(1, "active")];
/// let sql = rewrite_ordinal_params("SELECT * FROM users WHERE status = $1", &mut args);
/// assert_eq!(sql, "SELECT * FROM users WHERE status = @status");
/// assert_eq!(args[0].name(), Some("status"));
/// ```
pub fn rewrite_ordinal_params<'a>(sql: &'a str, args: &mut [NamedValue]) -> Cow<'a, str> {
    let code: HashSet<usize> = code_positions(sql).collect();
    let comparisons: Vec<(&str, &str)> = ORDINAL_COMPARISON
        .captures_iter(sql)
        .filter_map(|caps| {
            let ordinal = caps.name("ordinal")?;
            if !code.contains(&ordinal.start()) {
                return None;
            }
            let ident = caps.name("ident")?.as_str().trim_matches('"');
            Some((ident, ordinal.as_str()))
        })
        .collect();

    let mut rewritten = Cow::Borrowed(sql);
    let mut claimed: HashSet<usize> = HashSet::new();
    let mut taken: HashSet<String> = args
        .iter()
        .filter_map(|arg| arg.name().map(str::to_string))
        .collect();

    for arg in args.iter_mut() {
        if arg.name().is_some() || claimed.contains(&arg.ordinal()) {
            continue;
        }
        let token = format!("${}", arg.ordinal());
        let Some(&(ident, _)) = comparisons
            .iter()
            .find(|(name, t)| *t == token && !taken.contains(*name))
        else {
            continue;
        };
        if arg.assign_name(ident) {
            claimed.insert(arg.ordinal());
            taken.insert(ident.to_string());
            rewritten = Cow::Owned(replace_ordinal(&rewritten, arg.ordinal(), ident));
        }
    }

    rewritten
}

/// Replace every exact `$ordinal` token (not `$ordinal0`, not inside literals) with `@name`.
fn replace_ordinal(sql: &str, ordinal: usize, name: &str) -> String {
    let bytes = sql.as_bytes();
    let wanted = ordinal.to_string();
    let mut out = String::with_capacity(sql.len() + name.len());
    let mut copied = 0;

    for idx in code_positions(sql) {
        if idx < copied || bytes[idx] != b'$' {
            continue;
        }
        if let Some((end, digits)) = scan_digits(bytes, idx + 1)
            && digits == wanted
        {
            out.push_str(&sql[copied..idx]);
            out.push('@');
            out.push_str(name);
            copied = end;
        }
    }

    out.push_str(&sql[copied..]);
    out
}
