//! Indentation-scoped service block extraction
//!
//! A compose file is never parsed as YAML here. A service block is located
//! purely from line indentation: the key line fixes the scoping indentation,
//! and the block runs until the next sibling key (same indentation) or the
//! first structural line that is not nested below the key.

use serde::Serialize;
use std::ops::Range;

/// A service's block inside a compose document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceBlock {
    /// Service key the block belongs to
    pub key: String,
    /// Literal leading whitespace of the key line
    pub indentation: String,
    /// Block text, excluding the key line itself
    pub content: String,
    /// Byte range of `content` in the source document
    pub span: Range<usize>,
    /// Key of the sibling line that terminated the block, if any
    pub next_sibling: Option<String>,
}

impl ServiceBlock {
    /// Whether the key line is directly followed by the block's end
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Iterate over lines (terminators included) together with their byte offset.
pub(crate) fn lines_with_offsets(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source.split_inclusive('\n').scan(0usize, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line))
    })
}

/// Split a line into its content and its terminator (`\n`, `\r\n` or nothing).
pub(crate) fn split_eol(line: &str) -> (&str, &str) {
    let content = line
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line);
    (content, &line[content.len()..])
}

/// Leading spaces and tabs of a line.
pub(crate) fn leading_ws(line: &str) -> &str {
    let rest = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - rest.len()]
}

/// A line that takes part in the document structure: neither blank nor a comment.
fn is_structural(content: &str) -> bool {
    let trimmed = content.trim_start();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Key name of a `key:` line, looked up after the leading whitespace.
pub(crate) fn key_of(content: &str) -> Option<&str> {
    let rest = &content[leading_ws(content).len()..];
    let end = rest.find(|c: char| !is_key_char(c)).unwrap_or(rest.len());
    if end == 0 || !rest[end..].starts_with(':') {
        return None;
    }
    let after = &rest[end + 1..];
    if after.is_empty() || after.starts_with([' ', '\t']) {
        Some(&rest[..end])
    } else {
        None
    }
}

/// Whether `content` is exactly the key line of `key`.
fn is_key_line(content: &str, key: &str) -> bool {
    let rest = &content[leading_ws(content).len()..];
    rest.strip_prefix(key)
        .and_then(|r| r.strip_prefix(':'))
        .is_some_and(|after| after.is_empty() || after.starts_with([' ', '\t']))
}

/// Locate the key line of `key`, optionally restricted to one indentation.
///
/// Returns the line's byte offset, its full length and its indentation.
fn find_key_line<'a>(
    source: &'a str,
    key: &str,
    indentation: Option<&str>,
) -> Option<(usize, usize, &'a str)> {
    lines_with_offsets(source).find_map(|(offset, line)| {
        let (content, _) = split_eol(line);
        let ws = leading_ws(content);
        let indent_ok = indentation.is_none_or(|i| i == ws);
        (indent_ok && is_key_line(content, key)).then_some((offset, line.len(), ws))
    })
}

/// Extract the block of `key` from `source`.
///
/// The first matching key line wins; a document with the same key twice is
/// resolved by position only. Returns `None` when the key does not exist.
pub fn extract_block(source: &str, key: &str) -> Option<ServiceBlock> {
    let (offset, len, indentation) = find_key_line(source, key, None)?;
    Some(block_after(source, key, offset + len, indentation))
}

fn block_after(source: &str, key: &str, start: usize, indentation: &str) -> ServiceBlock {
    let mut end = source.len();
    let mut next_sibling = None;

    for (offset, line) in lines_with_offsets(&source[start..]) {
        let (content, _) = split_eol(line);
        if !is_structural(content) {
            continue;
        }
        let ws = leading_ws(content);
        let nested = ws.len() > indentation.len() && ws.starts_with(indentation);
        if nested {
            continue;
        }
        if ws == indentation {
            next_sibling = key_of(content).map(str::to_string);
        }
        end = start + offset;
        break;
    }

    tracing::debug!(
        service = %key,
        start,
        end,
        next = ?next_sibling,
        "extracted service block"
    );

    ServiceBlock {
        key: key.to_string(),
        indentation: indentation.to_string(),
        content: source[start..end].to_string(),
        span: start..end,
        next_sibling,
    }
}

/// Keys that are never services in a legacy (v1) compose file.
const TOP_LEVEL_NON_SERVICES: &[&str] = &[
    "version", "name", "services", "networks", "volumes", "secrets", "configs",
];

/// The top-level `services:` mapping and the indentation of its children.
fn services_mapping(source: &str) -> Option<(ServiceBlock, String)> {
    let (offset, len, _) = find_key_line(source, "services", Some(""))?;
    let block = block_after(source, "services", offset + len, "");
    let child_indent = lines_with_offsets(&block.content)
        .map(|(_, line)| split_eol(line).0)
        .find(|content| is_structural(content))
        .map(|content| leading_ws(content).to_string())?;
    Some((block, child_indent))
}

/// Extract the block of service `name`.
///
/// Looks among the direct children of the top-level `services:` mapping
/// first, so a nested key of the same name (a long-form `depends_on:` entry,
/// say) in an earlier service is never mistaken for the service. Documents
/// without that mapping fall back to [`extract_block`].
pub fn extract_service(source: &str, name: &str) -> Option<ServiceBlock> {
    if let Some((services, child_indent)) = services_mapping(source)
        && let Some((offset, len, indentation)) =
            find_key_line(&services.content, name, Some(child_indent.as_str()))
    {
        let start = services.span.start + offset + len;
        return Some(block_after(source, name, start, indentation));
    }
    extract_block(source, name)
}

/// List the service names declared in a compose document, in document order.
///
/// Reads the direct children of the top-level `services:` mapping. Files
/// without one are treated as the legacy format where every top-level key
/// (other than the reserved ones and `x-` extensions) is a service.
pub fn service_names(source: &str) -> Vec<String> {
    let Some((services, child_indent)) = services_mapping(source) else {
        return lines_with_offsets(source)
            .filter_map(|(_, line)| {
                let (content, _) = split_eol(line);
                if !leading_ws(content).is_empty() {
                    return None;
                }
                key_of(content)
            })
            .filter(|k| !k.starts_with("x-") && !TOP_LEVEL_NON_SERVICES.contains(k))
            .map(str::to_string)
            .collect();
    };

    lines_with_offsets(&services.content)
        .filter_map(|(_, line)| {
            let (content, _) = split_eol(line);
            (is_structural(content) && leading_ws(content) == child_indent)
                .then(|| key_of(content))
                .flatten()
        })
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = "services:\n  web:\n    image: nginx\n  db:\n    image: postgres\n";

    #[test]
    fn test_key_of_accepts_plain_keys() {
        assert_eq!(key_of("  web:"), Some("web"));
        assert_eq!(key_of("  my-app_2.x: "), Some("my-app_2.x"));
        assert_eq!(key_of("    image: nginx"), Some("image"));
    }

    #[test]
    fn test_key_of_rejects_non_keys() {
        assert_eq!(key_of("  - ./data:/data"), None);
        assert_eq!(key_of("  # web:"), None);
        assert_eq!(key_of("  web:latest"), None);
        assert_eq!(key_of("  :"), None);
    }

    #[test]
    fn test_split_eol_variants() {
        assert_eq!(split_eol("a\n"), ("a", "\n"));
        assert_eq!(split_eol("a\r\n"), ("a", "\r\n"));
        assert_eq!(split_eol("a"), ("a", ""));
    }

    #[test]
    fn test_extract_first_service() {
        let block = extract_block(DOC, "web").unwrap();
        assert_eq!(block.content, "    image: nginx\n");
        assert_eq!(block.indentation, "  ");
        assert_eq!(block.next_sibling.as_deref(), Some("db"));
        assert_eq!(&DOC[block.span.clone()], block.content);
    }

    #[test]
    fn test_extract_last_service_runs_to_eof() {
        let block = extract_block(DOC, "db").unwrap();
        assert_eq!(block.content, "    image: postgres\n");
        assert_eq!(block.next_sibling, None);
        assert_eq!(block.span.end, DOC.len());
    }

    #[test]
    fn test_extract_missing_service() {
        assert!(extract_block(DOC, "cache").is_none());
    }

    #[test]
    fn test_suffix_of_other_key_does_not_match() {
        let doc = "services:\n  myweb:\n    image: a\n  web:\n    image: b\n";
        let block = extract_block(doc, "web").unwrap();
        assert_eq!(block.content, "    image: b\n");
    }

    #[test]
    fn test_commented_key_does_not_match() {
        let doc = "services:\n  # web:\n  web:\n    image: b\n";
        let block = extract_block(doc, "web").unwrap();
        assert_eq!(block.content, "    image: b\n");
    }

    #[test]
    fn test_block_stops_at_dedent() {
        let doc = "services:\n  web:\n    image: a\nvolumes:\n  data:\n";
        let block = extract_block(doc, "web").unwrap();
        assert_eq!(block.content, "    image: a\n");
        assert_eq!(block.next_sibling, None);
    }

    #[test]
    fn test_comments_at_column_zero_stay_inside_block() {
        let doc = "services:\n  web:\n#    image: a\n    build: .\n  db:\n";
        let block = extract_block(doc, "web").unwrap();
        assert_eq!(block.content, "#    image: a\n    build: .\n");
    }

    #[test]
    fn test_empty_block() {
        let doc = "services:\n  web:\n  db:\n    image: x\n";
        let block = extract_block(doc, "web").unwrap();
        assert!(block.is_empty());
        assert_eq!(block.next_sibling.as_deref(), Some("db"));
    }

    #[test]
    fn test_service_names_from_services_mapping() {
        let doc = "version: '3'\nservices:\n  web:\n    image: a\n\n  db:\n    image: b\nvolumes:\n  data:\n";
        assert_eq!(service_names(doc), vec!["web", "db"]);
    }

    #[test]
    fn test_service_names_legacy_format() {
        let doc = "web:\n  image: a\nx-common:\n  foo: bar\ndb:\n  image: b\n";
        assert_eq!(service_names(doc), vec!["web", "db"]);
    }

    #[test]
    fn test_extract_service_skips_nested_key_of_same_name() {
        let doc = "services:\n  web:\n    image: a\n    depends_on:\n      db:\n        condition: service_started\n  db:\n    image: postgres\n    # build: ./db\n";
        let block = extract_service(doc, "db").unwrap();
        assert_eq!(block.content, "    image: postgres\n    # build: ./db\n");
        assert_eq!(block.indentation, "  ");
        assert_eq!(&doc[block.span.clone()], block.content);

        // the plain extractor still takes the first match
        let nested = extract_block(doc, "db").unwrap();
        assert_eq!(nested.indentation, "      ");
    }

    #[test]
    fn test_extract_service_legacy_format() {
        let doc = "web:\n  image: a\ndb:\n  image: b\n";
        let block = extract_service(doc, "db").unwrap();
        assert_eq!(block.content, "  image: b\n");
    }

    #[test]
    fn test_extract_service_missing() {
        assert!(extract_service(DOC, "cache").is_none());
    }
}
