use log::trace;

use crate::error::{DocError, Result};
use crate::{Node, Object};

const BOM: char = '\u{feff}';

/// Surface details of the source text that JSON parsing throws away but a
/// rewrite should keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub bom: bool,
    pub crlf: bool,
    pub trailing_newline: bool,
}

impl TextStyle {
    pub fn detect(text: &str) -> Self {
        Self {
            bom: text.starts_with(BOM),
            crlf: text.contains("\r\n"),
            trailing_newline: text.ends_with('\n'),
        }
    }
}

/// A parsed manifest: the root object plus the text style it was read with.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Object,
    style: TextStyle,
}

impl Document {
    /// Parse manifest text. The top-level value must be an object.
    pub fn parse(text: &str) -> Result<Self> {
        let style = TextStyle::detect(text);
        let body = text.strip_prefix(BOM).unwrap_or(text);
        let node: Node = serde_json::from_str(body).map_err(DocError::Parse)?;
        trace!("Parsed document ({style:?})");
        match node {
            Node::Object(root) => Ok(Self { root, style }),
            other => Err(DocError::schema("", "object", other.kind_name())),
        }
    }

    pub fn root(&self) -> &Object {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Object {
        &mut self.root
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    pub fn into_root(self) -> Object {
        self.root
    }

    /// Serialize with two-space indentation, reproducing the source's BOM, line
    /// endings and trailing newline.
    pub fn to_text(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(&self.root).map_err(DocError::Serialize)?;
        if self.style.trailing_newline {
            text.push('\n');
        }
        // serde_json escapes newlines inside strings, so every raw '\n' is structural
        if self.style.crlf {
            text = text.replace('\n', "\r\n");
        }
        if self.style.bom {
            text.insert(0, BOM);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_output() {
        let doc = Document::parse(r#"{"b":1,"a":{"x":[true,null]},"e":{}}"#).unwrap();
        assert_eq!(
            doc.to_text().unwrap(),
            "{\n  \"b\": 1,\n  \"a\": {\n    \"x\": [\n      true,\n      null\n    ]\n  },\n  \"e\": {}\n}"
        );
    }

    #[test]
    fn test_trailing_newline_kept() {
        let doc = Document::parse("{\"a\": 1}\n").unwrap();
        assert_eq!(doc.to_text().unwrap(), "{\n  \"a\": 1\n}\n");

        let doc = Document::parse("{\"a\": 1}").unwrap();
        assert_eq!(doc.to_text().unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_crlf_kept() {
        let doc = Document::parse("{\r\n  \"a\": \"line\\nbreak\"\r\n}\r\n").unwrap();
        assert!(doc.style().crlf);
        assert_eq!(
            doc.to_text().unwrap(),
            "{\r\n  \"a\": \"line\\nbreak\"\r\n}\r\n"
        );
    }

    #[test]
    fn test_bom_kept() {
        let doc = Document::parse("\u{feff}{\"a\": 1}").unwrap();
        assert!(doc.style().bom);
        assert_eq!(doc.to_text().unwrap(), "\u{feff}{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_parse_error() {
        let err = Document::parse("{\"a\": ").unwrap_err();
        assert!(matches!(err, DocError::Parse(_)), "{err}");
    }

    #[test]
    fn test_non_object_root() {
        let err = Document::parse("[1, 2]").unwrap_err();
        match err {
            DocError::SchemaViolation { path, found, .. } => {
                assert_eq!(path, "");
                assert_eq!(found, "array");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unicode_not_escaped() {
        let doc = Document::parse(r#"{"title":"Größe ✓"}"#).unwrap();
        assert_eq!(doc.to_text().unwrap(), "{\n  \"title\": \"Größe ✓\"\n}");
    }

    #[test]
    fn test_numbers_written_in_canonical_form() {
        let doc = Document::parse(r#"{"big": 1e5, "count": 100, "ratio": 0.50}"#).unwrap();
        assert_eq!(
            doc.to_text().unwrap(),
            "{\n  \"big\": 100000.0,\n  \"count\": 100,\n  \"ratio\": 0.5\n}"
        );
    }
}
