use super::{Formatter, ToPython};

use std::fmt;

/// A single-quoted Python string literal
pub(crate) struct Str<S>(pub(crate) S);

impl<S: AsRef<str>> fmt::Display for Str<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;

        f.write_char('\'')?;
        for c in self.0.as_ref().chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '\'' => f.write_str("\\'")?,
                '\n' => f.write_str("\\n")?,
                c => f.write_char(c)?,
            }
        }
        f.write_char('\'')
    }
}

impl<S: AsRef<str>> ToPython for Str<S> {
    fn to_python(self, f: &mut Formatter<'_>) {
        f.dst.push_str(&self.to_string());
    }
}

/// A Python identifier derived from a table name. Characters that cannot
/// appear in an identifier become `_`; namespaced tables are prefixed with
/// their schema.
pub(crate) fn identifier(schema: Option<&str>, name: &str) -> String {
    let raw = match schema {
        Some(schema) => format!("{schema}_{name}"),
        None => name.to_string(),
    };

    let mut ident: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    ident
}
