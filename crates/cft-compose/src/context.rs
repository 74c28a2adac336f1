//! Build context lookup for a service block

use crate::block::split_eol;
use crate::directive::{LineView, comment_style};

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|q| value.strip_prefix(q).and_then(|v| v.strip_suffix(q)))
        .unwrap_or(value)
}

/// Path of the block's `build:` directive, whether active or commented out.
///
/// Handles both `build: ./app` and the long form with a `context:` child.
pub fn build_context(block: &str) -> Option<String> {
    let style = comment_style(block);
    let mut head_indent: Option<usize> = None;

    for line in block.split_inclusive('\n') {
        let (raw, _) = split_eol(line);
        let view = LineView::parse(raw, style);
        if view.payload().trim().is_empty() {
            continue;
        }

        if let Some(indent) = head_indent {
            if view.indent() <= indent {
                return None;
            }
            let body = view.payload().trim_start();
            if let Some(value) = body.strip_prefix("context:") {
                let value = unquote(value.trim());
                return (!value.is_empty()).then(|| value.to_string());
            }
            continue;
        }

        if view.directive() == Some("build") {
            let value = unquote(view.value().unwrap_or_default());
            if !value.is_empty() {
                return Some(value.to_string());
            }
            head_indent = Some(view.indent());
        }
    }

    None
}
