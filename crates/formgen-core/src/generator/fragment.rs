//! Source fragment tree
//!
//! Generators build a [`Fragment`] tree with conditional parts resolved up
//! front, then serialize it once. Indentation is structural, so nested
//! fragments can be produced without knowing where they end up.

const INDENT: &str = "  ";

/// A piece of generated source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Renders nothing
    Empty,
    /// A single line at the current indentation
    Line(String),
    /// A separating blank line; runs of blanks collapse to one
    Blank,
    /// Fragments rendered one after another
    Seq(Vec<Fragment>),
    /// A fragment rendered one level deeper
    Indent(Box<Fragment>),
}

impl Fragment {
    pub fn line(text: impl Into<String>) -> Self {
        Fragment::Line(text.into())
    }

    pub fn seq(parts: impl IntoIterator<Item = Fragment>) -> Self {
        Fragment::Seq(parts.into_iter().collect())
    }

    pub fn indent(inner: Fragment) -> Self {
        Fragment::Indent(Box::new(inner))
    }

    /// `open`, the indented body, then `close`
    pub fn block(open: impl Into<String>, body: Fragment, close: impl Into<String>) -> Self {
        Fragment::seq([Fragment::line(open), Fragment::indent(body), Fragment::line(close)])
    }

    /// `build()` when `cond` holds, otherwise nothing
    pub fn when(cond: bool, build: impl FnOnce() -> Fragment) -> Self {
        if cond {
            build()
        } else {
            Fragment::Empty
        }
    }

    /// Multi-line verbatim text; empty lines become blanks
    pub fn text(source: &str) -> Self {
        Fragment::seq(source.lines().map(|l| {
            if l.trim().is_empty() {
                Fragment::Blank
            } else {
                Fragment::line(l)
            }
        }))
    }

    /// Serialize to source text ending in a single newline
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        self.collect(0, &mut lines);

        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn collect(&self, depth: usize, lines: &mut Vec<String>) {
        match self {
            Fragment::Empty => {}
            Fragment::Line(text) => lines.push(format!("{}{}", INDENT.repeat(depth), text)),
            Fragment::Blank => {
                if lines.last().is_some_and(|l| !l.is_empty()) {
                    lines.push(String::new());
                }
            }
            Fragment::Seq(parts) => {
                for part in parts {
                    part.collect(depth, lines);
                }
            }
            Fragment::Indent(inner) => inner.collect(depth + 1, lines),
        }
    }
}

/// Quote `value` as a double-quoted JavaScript string literal
pub fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// A JSX attribute value: a plain string when possible, an expression otherwise
pub fn jsx_attr(value: &str) -> String {
    if value.contains(['"', '\\', '\n']) {
        format!("{{{}}}", js_string(value))
    } else {
        format!("\"{}\"", value)
    }
}

/// JSX child text, wrapped in an expression when it holds markup characters
pub fn jsx_text(value: &str) -> String {
    if value.contains(['{', '}', '<', '>', '"', '\\', '\n']) {
        format!("{{{}}}", js_string(value))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested_indentation() {
        let f = Fragment::block(
            "function f() {",
            Fragment::seq([
                Fragment::line("const a = 1;"),
                Fragment::block("if (a) {", Fragment::line("return a;"), "}"),
            ]),
            "}",
        );
        assert_eq!(
            f.render(),
            "function f() {\n  const a = 1;\n  if (a) {\n    return a;\n  }\n}\n"
        );
    }

    #[test]
    fn test_blank_lines_collapse() {
        let f = Fragment::seq([
            Fragment::Blank,
            Fragment::line("a"),
            Fragment::Blank,
            Fragment::when(false, || Fragment::line("skipped")),
            Fragment::Blank,
            Fragment::line("b"),
            Fragment::Blank,
        ]);
        assert_eq!(f.render(), "a\n\nb\n");
    }

    #[test]
    fn test_text_keeps_lines() {
        let f = Fragment::indent(Fragment::text("one\n\ntwo"));
        assert_eq!(f.render(), "  one\n\n  two\n");
    }

    #[test]
    fn test_js_string_escapes() {
        assert_eq!(js_string("plain"), "\"plain\"");
        assert_eq!(js_string("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(js_string("a\\b\nc"), "\"a\\\\b\\nc\"");
    }

    #[test]
    fn test_jsx_helpers() {
        assert_eq!(jsx_attr("you@example.com"), "\"you@example.com\"");
        assert_eq!(jsx_attr("6\" wide"), "{\"6\\\" wide\"}");
        assert_eq!(jsx_text("Email"), "Email");
        assert_eq!(jsx_text("a < b"), "{\"a < b\"}");
    }
}
