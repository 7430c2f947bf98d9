//! Generator JavaScript literal.
//!
//! ```text
//! var _ccoding_stds_main =
//! [
//!     [ "Heap", "_ccoding_stds_main.html#cstdsHeap", null ],
//!     [ "C Standard Parameters", "_c_standards_parameters.html", [
//!       [ "Tabs", "_c_standards_parameters.html#cstdsparamTabs", null ]
//!     ] ]
//! ];
//! ```
//!
//! `/* ... */` and `//` comments (license banners) are skipped before the
//! declaration and after the array. The `var NAME =` declaration and the
//! trailing `;` are optional on read.
//! The array itself is JSON-compatible, so rows are parsed with `serde_json`.

use serde::Deserialize;

use crate::codec::Format;
use crate::entry::NavEntry;
use crate::error::NavError;
use crate::target::Target;
use crate::tree::{NavTree, is_valid_identifier};

/// Variable name used when the tree has none.
pub const DEFAULT_NAME: &str = "NAVTREE";

const TOP_LEVEL_INDENT: usize = 4;
const NESTED_INDENT: usize = 2;

const DECLARATION_KEYWORDS: [&str; 3] = ["var", "let", "const"];

/// `[label, target, children]`; exactly three elements.
#[derive(Deserialize)]
struct Row(String, Option<Target>, Option<Vec<Row>>);

impl Row {
    fn into_entry(self) -> NavEntry {
        let Self(label, target, children) = self;
        let children = children
            .unwrap_or_default()
            .into_iter()
            .map(Self::into_entry)
            .collect();
        NavEntry::new(label, target, children)
    }
}

pub(super) fn decode(text: &str) -> Result<NavTree, NavError> {
    let (name, body) = split_declaration(text)?;
    let rows = parse_rows(body)?;
    let entries = rows.into_iter().map(Row::into_entry).collect();
    NavTree::new(name.map(str::to_owned), entries)
}

pub(super) fn encode(tree: &NavTree, name: &str) -> Result<String, NavError> {
    if !is_valid_identifier(name) {
        return Err(NavError::Encode {
            format: Format::Navtree,
            message: format!("`{name}` is not a valid identifier"),
        });
    }

    let mut out = format!("var {name} =\n[\n");
    if !tree.is_empty() {
        write_rows(&mut out, tree.entries(), TOP_LEVEL_INDENT)?;
        out.push('\n');
    }
    out.push_str("];\n");
    Ok(out)
}

fn write_rows(out: &mut String, entries: &[NavEntry], indent: usize) -> Result<(), NavError> {
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        push_indent(out, indent);
        out.push_str("[ ");
        out.push_str(&quote(entry.label())?);
        out.push_str(", ");
        match entry.target() {
            Some(target) => out.push_str(&quote(&target.to_string())?),
            None => out.push_str("null"),
        }

        if entry.has_children() {
            out.push_str(", [\n");
            write_rows(out, entry.children(), indent + NESTED_INDENT)?;
            out.push('\n');
            push_indent(out, indent);
            out.push_str("] ]");
        } else {
            out.push_str(", null ]");
        }
    }
    Ok(())
}

fn push_indent(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat_n(' ', indent));
}

fn quote(value: &str) -> Result<String, NavError> {
    serde_json::to_string(value).map_err(|e| NavError::Encode {
        format: Format::Navtree,
        message: e.to_string(),
    })
}

/// Split `var NAME = [...];` into the name and the array text.
fn split_declaration(text: &str) -> Result<(Option<&str>, &str), NavError> {
    let text = skip_comments(text)?;

    let declared = DECLARATION_KEYWORDS.iter().find_map(|keyword| {
        text.strip_prefix(*keyword)
            .filter(|rest| rest.starts_with(char::is_whitespace))
    });
    let Some(rest) = declared else {
        return Ok((None, text));
    };

    let (name, body) = rest.split_once('=').ok_or_else(|| {
        NavError::malformed(Format::Navtree, "expected `=` after the variable name")
    })?;
    Ok((Some(name.trim()), body))
}

/// Parse the row array; only `;` and comments may follow it.
fn parse_rows(body: &str) -> Result<Vec<Row>, NavError> {
    let mut stream = serde_json::Deserializer::from_str(body).into_iter::<Vec<Row>>();
    let rows = stream
        .next()
        .ok_or_else(|| NavError::malformed(Format::Navtree, "expected an array of rows"))?
        .map_err(|e| NavError::malformed(Format::Navtree, e))?;

    let rest = body[stream.byte_offset()..].trim_start();
    let rest = rest.strip_prefix(';').unwrap_or(rest);
    if !skip_comments(rest)?.is_empty() {
        return Err(NavError::malformed(
            Format::Navtree,
            "unexpected content after the array",
        ));
    }
    Ok(rows)
}

fn skip_comments(mut text: &str) -> Result<&str, NavError> {
    loop {
        text = text.trim_start();
        if let Some(rest) = text.strip_prefix("/*") {
            let (_, after) = rest.split_once("*/").ok_or_else(|| {
                NavError::malformed(Format::Navtree, "unterminated block comment")
            })?;
            text = after;
        } else if let Some(rest) = text.strip_prefix("//") {
            text = rest.split_once('\n').map_or("", |(_, after)| after);
        } else {
            return Ok(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const NESTED: &str = r#"var NAVTREE =
[
    [ "Guide", "guide.html", [
      [ "Setup", "guide.html#setup", null ],
      [ "Group", null, [
        [ "Deep", "deep.html", null ]
      ] ]
    ] ],
    [ "FAQ", "faq.html", null ]
];
"#;

    #[test]
    fn test_decode_nested() {
        let tree = decode(NESTED).unwrap();

        assert_eq!(tree.name(), Some("NAVTREE"));
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.get(&[0, 1, 0]).unwrap().label(), "Deep");
        assert!(!tree.get(&[0, 1]).unwrap().is_navigable());
    }

    #[test]
    fn test_encode_reproduces_layout() {
        let tree = decode(NESTED).unwrap();

        assert_eq!(encode(&tree, "NAVTREE").unwrap(), NESTED);
    }

    #[test]
    fn test_decode_bare_array() {
        let tree = decode(r#"[ [ "FAQ", "faq.html", null ] ]"#).unwrap();

        assert_eq!(tree.name(), None);
        assert_eq!(tree.entries()[0].label(), "FAQ");
    }

    #[test]
    fn test_decode_skips_license_banner() {
        let text = "/*\n @licstart  license text\n @licend\n*/\n// generated\nvar NAVTREE =\n[\n  [ \"FAQ\", \"faq.html\", null ]\n];";

        let tree = decode(text).unwrap();

        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_decode_empty_children_array() {
        let tree = decode(r#"var nav = [ [ "FAQ", "faq.html", [] ] ];"#).unwrap();

        assert!(tree.entries()[0].children().is_empty());
    }

    #[test]
    fn test_decode_row_with_two_elements_is_malformed() {
        let err = decode(r#"var nav = [ [ "FAQ", "faq.html" ] ];"#).unwrap_err();

        assert!(matches!(err, NavError::Malformed(_)));
        assert!(err.to_string().contains("navtree"));
    }

    #[test]
    fn test_decode_row_with_four_elements_is_malformed() {
        let err = decode(r#"var nav = [ [ "FAQ", "faq.html", null, 1 ] ];"#).unwrap_err();

        assert!(matches!(err, NavError::Malformed(_)));
    }

    #[test]
    fn test_decode_deferred_children_file_is_malformed() {
        let err = decode(r#"var nav = [ [ "Files", "files.html", "files_dup" ] ];"#).unwrap_err();

        assert!(matches!(err, NavError::Malformed(_)));
    }

    #[test]
    fn test_decode_missing_equals_is_malformed() {
        let err = decode(r#"var nav [ ];"#).unwrap_err();

        assert!(err.to_string().contains("expected `=`"));
    }

    #[test]
    fn test_decode_unterminated_comment_is_malformed() {
        let err = decode("/* banner\nvar nav = [];").unwrap_err();

        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn test_decode_skips_trailing_comments() {
        let text = "var nav = [ [ \"FAQ\", \"http://example.com/faq\", null ] ]; // end of nav\n/* generated */\n";

        let tree = decode(text).unwrap();

        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_decode_trailing_content_is_malformed() {
        let err = decode("var nav = [ ];\nvar other = [ ];").unwrap_err();

        assert!(err.to_string().contains("unexpected content"));
    }

    #[test]
    fn test_decode_empty_text_is_malformed() {
        let err = decode("// nothing here\n").unwrap_err();

        assert!(matches!(err, NavError::Malformed(_)));
    }

    #[test]
    fn test_encode_empty_tree() {
        let tree = NavTree::default();

        assert_eq!(encode(&tree, "nav").unwrap(), "var nav =\n[\n];\n");
    }

    #[test]
    fn test_encode_escapes_quotes() {
        let tree = decode(r#"[ [ "Say \"hi\"", null, null ] ]"#).unwrap();

        let text = encode(&tree, "nav").unwrap();

        assert!(text.contains(r#"[ "Say \"hi\"", null, null ]"#));
        assert_eq!(decode(&text).unwrap().entries(), tree.entries());
    }

    #[test]
    fn test_encode_invalid_name_is_error() {
        let err = encode(&NavTree::default(), "bad name").unwrap_err();

        assert!(matches!(err, NavError::Encode { format: Format::Navtree, .. }));
    }
}
