//! Text assembly for FASTBuild descriptors.
//!
//! Every descriptor is built in memory and uses `\n` line endings on all
//! hosts. Values taken from the solution model go through [`escape`] so that
//! a stray `'`, `$` or `^` can never end a string or start a variable
//! substitution.

use std::path::Path;

/// Accumulates the lines of one descriptor.
#[derive(Debug, Default)]
pub struct BffWriter {
    buf: String,
}

impl BffWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        BffWriter { buf: String::new() }
    }

    /// Append one line.
    pub fn line(&mut self, line: impl AsRef<str>) {
        self.buf.push_str(line.as_ref());
        self.buf.push('\n');
    }

    /// Append an empty line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Append a `//` comment line.
    pub fn comment(&mut self, text: &str) {
        self.line(format!("// {}", text));
    }

    /// Append several lines verbatim.
    pub fn lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.line(line);
        }
    }

    /// Finish and return the descriptor text.
    pub fn finish(self) -> String {
        self.buf
    }
}

/// Escape a value for use inside a single-quoted FASTBuild string.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '^' | '\'' | '$') {
            out.push('^');
        }
        out.push(c);
    }
    out
}

/// Render a path as an escaped string (no surrounding quotes).
pub fn path_value(path: &Path) -> String {
    escape(&path.display().to_string())
}

/// Render a path wrapped in double quotes, for use inside a command line.
pub fn quoted_path(path: &Path) -> String {
    format!("\"{}\"", path_value(path))
}

/// Render a single-quoted string literal.
pub fn string_literal(value: &str) -> String {
    format!("'{}'", escape(value))
}

/// Render a FASTBuild array of string literals, e.g. `{ 'a', 'b' }`.
///
/// An empty list renders as `{ }`.
pub fn string_array<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let items: Vec<String> = items
        .into_iter()
        .map(|item| string_literal(item.as_ref()))
        .collect();

    if items.is_empty() {
        "{ }".to_string()
    } else {
        format!("{{ {} }}", items.join(", "))
    }
}

/// Render an option-list value: each item preceded by a space, so the
/// variable can be concatenated onto a base option string.
///
/// Items must already be escaped. An empty list renders as `''`.
pub fn option_value(items: &[String]) -> String {
    let mut value = String::new();
    for item in items {
        value.push(' ');
        value.push_str(item);
    }
    format!("'{}'", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("it's"), "it^'s");
        assert_eq!(escape("$(OutDir)"), "^$(OutDir)");
        assert_eq!(escape("a^b"), "a^^b");
    }

    #[test]
    fn test_string_array() {
        assert_eq!(string_array(["a", "b"]), "{ 'a', 'b' }");
        assert_eq!(string_array(Vec::<String>::new()), "{ }");
    }

    #[test]
    fn test_option_value() {
        assert_eq!(option_value(&[]), "''");
        assert_eq!(
            option_value(&["/DFOO".to_string(), "/DBAR".to_string()]),
            "' /DFOO /DBAR'"
        );
    }

    #[test]
    fn test_writer_uses_lf() {
        let mut w = BffWriter::new();
        w.line("{");
        w.comment("note");
        w.blank();
        w.line("}");
        assert_eq!(w.finish(), "{\n// note\n\n}\n");
    }

    #[test]
    fn test_quoted_path() {
        assert_eq!(quoted_path(Path::new("/sln/inc")), "\"/sln/inc\"");
    }
}
