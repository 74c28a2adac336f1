//! Image tag rewriting
//!
//! Works on every `image:` line of a document, active or commented out, so
//! that switching a service back to its image keeps the requested tag.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// An `image:` directive line, optionally commented, and its image reference.
static IMAGE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^(?P<head>[ \t]*(?:#[ \t]*)?image:[ \t]*)(?P<quote>["']?)(?P<reference>[^\s"'#]+)"#)
        .unwrap()
});

/// Split an image reference into its name and tag.
///
/// A colon only starts a tag after the last `/`, so registry ports such as
/// `registry:5000/app` stay part of the name. Digests are dropped.
pub fn split_reference(reference: &str) -> (&str, Option<&str>) {
    let reference = reference.split('@').next().unwrap_or(reference);
    let name_start = reference.rfind('/').map_or(0, |i| i + 1);
    match reference[name_start..].rfind(':') {
        Some(i) => (
            &reference[..name_start + i],
            Some(&reference[name_start + i + 1..]),
        ),
        None => (reference, None),
    }
}

/// Compile image name patterns.
pub fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p.as_ref()).map_err(|source| Error::InvalidPattern {
                pattern: p.as_ref().to_string(),
                source,
            })
        })
        .collect()
}

/// Set (or, with `tag == None`, strip) the tag of every image whose name
/// matches one of `patterns`. An empty pattern list matches all images.
pub fn retag_images(source: &str, patterns: &[Regex], tag: Option<&str>) -> String {
    let tag = tag.filter(|t| !t.is_empty());

    IMAGE_LINE
        .replace_all(source, |caps: &Captures<'_>| {
            let (name, _) = split_reference(&caps["reference"]);
            let selected = patterns.is_empty() || patterns.iter().any(|p| p.is_match(name));
            if !selected {
                return caps[0].to_string();
            }
            tracing::debug!(image = %name, tag = ?tag, "retagging image");
            match tag {
                Some(tag) => format!("{}{}{name}:{tag}", &caps["head"], &caps["quote"]),
                None => format!("{}{}{name}", &caps["head"], &caps["quote"]),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("myapp:old", "myapp", Some("old"))]
    #[case("myapp", "myapp", None)]
    #[case("registry:5000/team/app", "registry:5000/team/app", None)]
    #[case("registry:5000/team/app:1.2", "registry:5000/team/app", Some("1.2"))]
    #[case("app@sha256:abc", "app", None)]
    fn test_split_reference(#[case] reference: &str, #[case] name: &str, #[case] tag: Option<&str>) {
        assert_eq!(split_reference(reference), (name, tag));
    }

    #[test]
    fn test_retag_sets_tag() {
        let out = retag_images("    image: myapp:old\n", &[], Some("v2"));
        assert_eq!(out, "    image: myapp:v2\n");
    }

    #[test]
    fn test_retag_strips_tag() {
        let out = retag_images("    image: myapp:old\n", &[], None);
        assert_eq!(out, "    image: myapp\n");
    }

    #[test]
    fn test_retag_adds_tag_to_untagged_image() {
        let out = retag_images("    image: nginx\n    ports:\n      - 80:80\n", &[], Some("1.25"));
        assert_eq!(out, "    image: nginx:1.25\n    ports:\n      - 80:80\n");
    }

    #[test]
    fn test_retag_respects_patterns() {
        let source = "  web:\n    image: acme/web:1\n  db:\n    image: postgres:15\n";
        let patterns = compile_patterns(&["acme/"]).unwrap();
        let out = retag_images(source, &patterns, Some("2"));
        assert_eq!(out, "  web:\n    image: acme/web:2\n  db:\n    image: postgres:15\n");
    }

    #[test]
    fn test_retag_commented_image_and_quotes() {
        let source = "    # image: \"acme/web:1\" # pinned\n";
        let out = retag_images(source, &[], Some("2"));
        assert_eq!(out, "    # image: \"acme/web:2\" # pinned\n");
    }

    #[test]
    fn test_retag_ignores_other_keys() {
        let source = "    x-image: foo:1\n    base_image: bar:1\n";
        assert_eq!(retag_images(source, &[], Some("2")), source);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = compile_patterns(&["("]).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { pattern, .. } if pattern == "("));
    }
}
