//! Comment stripping ahead of the lexer
//!
//! The lexer never sees comments. This pass removes `//` line comments that sit outside string literals and keeps
//! every line in place, so token positions computed on the stripped text are also positions in the original file.

/// Output of [`strip_comments`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessed {
    /// Source with comments removed; same number of lines as the input
    pub source: String,
    /// 1-based numbers of lines that held nothing but a comment
    pub comment_lines: Vec<usize>,
}

/// Remove `//` comments from `source`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn strip_comments(source: &str) -> Preprocessed {
    let mut lines = Vec::new();
    let mut comment_lines = Vec::new();

    for (index, line) in source.split('\n').enumerate() {
        let stripped = strip_line(line);
        if stripped.trim().is_empty() && !line.trim().is_empty() {
            comment_lines.push(index + 1);
        }
        lines.push(stripped);
    }

    tracing::debug!(comment_lines = comment_lines.len(), "stripped comments");
    Preprocessed {
        source: lines.join("\n"),
        comment_lines,
    }
}

/// The part of `line` before a `//` that is not inside a string literal.
fn strip_line(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in bytes.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'/' if !in_string && bytes.get(i + 1) == Some(&b'/') => return line[..i].trim_end(),
            _ => {}
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_trailing_comment() {
        let out = strip_comments("x: Int32 = 1 // one\n");
        assert_eq!(out.source, "x: Int32 = 1\n");
        assert!(out.comment_lines.is_empty());
    }

    #[test]
    fn test_keeps_line_count() {
        let src = "module \"kira:main\"\n// hello world!\npub mut h: Int32 = 123 // trailing\n//\nx: Int32 = 123";
        let out = strip_comments(src);
        let lines: Vec<_> = out.source.split('\n').collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].is_empty());
        assert_eq!(lines[2], "pub mut h: Int32 = 123");
        assert_eq!(out.comment_lines, vec![2, 4]);
    }

    #[test]
    fn test_slashes_inside_strings_are_kept() {
        let src = "use \"std:http//client\" // not this";
        assert_eq!(strip_comments(src).source, "use \"std:http//client\"");
    }

    #[test]
    fn test_escaped_quote_does_not_close_a_string() {
        let src = r#"s: String = "a\"//b" // c"#;
        assert_eq!(strip_comments(src).source, r#"s: String = "a\"//b""#);
    }

    #[test]
    fn test_single_slash_is_division() {
        assert_eq!(strip_comments("a / b").source, "a / b");
    }

    #[test]
    fn test_blank_lines_are_not_comment_lines() {
        let out = strip_comments("\n   \n// c\n");
        assert_eq!(out.comment_lines, vec![3]);
    }
}
