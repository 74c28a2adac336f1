//! Directive classification and toggling inside a service block
//!
//! A service is either run from a prebuilt image (`image:` active, `build:`
//! and `volumes:` commented out) or built from source (the inverse). Toggling
//! flips both groups in one pass over the block's lines. Children of a
//! directive (volume items, long-form `build:` keys) follow their head line,
//! tracked by indentation.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

use crate::block::{leading_ws, split_eol};

const IMAGE: &str = "image";
const BUILD: &str = "build";
const VOLUMES: &str = "volumes";

/// Which directive group of a service is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// `image:` active, `build:`/`volumes:` commented
    ImageActive,
    /// `build:`/`volumes:` active, `image:` commented
    BuildActive,
}

impl Mode {
    pub fn opposite(self) -> Self {
        match self {
            Mode::ImageActive => Mode::BuildActive,
            Mode::BuildActive => Mode::ImageActive,
        }
    }

    /// Directive keys that are active in this mode.
    fn keys(self) -> &'static [&'static str] {
        match self {
            Mode::ImageActive => &[IMAGE],
            Mode::BuildActive => &[BUILD, VOLUMES],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::ImageActive => write!(f, "image"),
            Mode::BuildActive => write!(f, "build"),
        }
    }
}

/// Where the `#` of a commented directive sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentStyle {
    /// `    # image: nginx`
    #[default]
    Indented,
    /// `    #image: nginx`
    Tight,
    /// `#    image: nginx`
    LineStart,
}

impl CommentStyle {
    /// Style of a single commented line, judged on its own.
    fn of_line(raw: &str) -> Option<Self> {
        let ws = leading_ws(raw);
        let after = raw[ws.len()..].strip_prefix('#')?;
        Some(if ws.is_empty() {
            CommentStyle::LineStart
        } else if after.starts_with(' ') {
            CommentStyle::Indented
        } else {
            CommentStyle::Tight
        })
    }

    /// Comment out `raw`, placing the marker at `column` when the style allows it.
    fn comment(self, raw: &str, column: usize) -> String {
        let marker = match self {
            CommentStyle::LineStart => return format!("#{raw}"),
            CommentStyle::Indented => "# ",
            CommentStyle::Tight => "#",
        };
        let column = column.min(leading_ws(raw).len());
        format!("{}{}{}", &raw[..column], marker, &raw[column..])
    }
}

/// One line of a block, seen both as written and as it reads uncommented
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineView<'a> {
    raw: &'a str,
    payload: Cow<'a, str>,
    commented: bool,
}

impl<'a> LineView<'a> {
    /// Parse a line (without terminator) using the comment style of its block.
    pub fn parse(raw: &'a str, style: CommentStyle) -> Self {
        let ws = leading_ws(raw);
        let Some(after) = raw[ws.len()..].strip_prefix('#') else {
            return Self {
                raw,
                payload: Cow::Borrowed(raw),
                commented: false,
            };
        };

        let payload = match style {
            CommentStyle::LineStart if ws.is_empty() => Cow::Borrowed(after),
            CommentStyle::Tight => Cow::Owned(format!("{ws}{after}")),
            _ => Cow::Owned(format!("{ws}{}", after.strip_prefix(' ').unwrap_or(after))),
        };

        Self {
            raw,
            payload,
            commented: true,
        }
    }

    pub fn raw(&self) -> &str {
        self.raw
    }

    /// The line with its comment marker removed.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn is_commented(&self) -> bool {
        self.commented
    }

    /// Blank lines, including a bare `#`, never affect directive groups.
    fn is_blank(&self) -> bool {
        self.payload.trim().is_empty()
    }

    /// Indentation width of the uncommented line.
    pub fn indent(&self) -> usize {
        leading_ws(&self.payload).len()
    }

    /// The directive key (`image`, `build` or `volumes`) this line opens, if any.
    pub fn directive(&self) -> Option<&'static str> {
        let body = self.payload.trim_start();
        [IMAGE, BUILD, VOLUMES]
            .into_iter()
            .find(|key| body.strip_prefix(key).is_some_and(|r| r.starts_with(':')))
    }

    /// Value written after the directive's colon, with any trailing comment removed.
    pub fn value(&self) -> Option<&str> {
        let body = self.payload.trim_start();
        let (_, value) = body.split_once(':')?;
        let value = match value.find(" #") {
            Some(pos) => &value[..pos],
            None => value,
        };
        Some(value.trim())
    }
}

/// Comment style of the commented directives in `block`.
///
/// The first commented directive decides; blocks without one use
/// [`CommentStyle::Indented`].
pub fn comment_style(block: &str) -> CommentStyle {
    block
        .lines()
        .filter_map(|raw| {
            let style = CommentStyle::of_line(raw)?;
            LineView::parse(raw, style).directive().map(|_| style)
        })
        .next()
        .unwrap_or_default()
}

/// Determine which directive group of `block` is active.
///
/// A commented `image:` line means the service currently builds from source.
pub fn classify(block: &str) -> Mode {
    let commented_image = block.lines().any(|raw| {
        CommentStyle::of_line(raw).is_some_and(|style| {
            LineView::parse(raw, style).directive() == Some(IMAGE)
        })
    });

    if commented_image {
        Mode::BuildActive
    } else {
        Mode::ImageActive
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Comment,
    Uncomment,
}

/// A directive head line and the lines that belong to it
#[derive(Debug, Clone, Copy)]
struct Group {
    /// `None` when the head is already in the requested state
    action: Option<Action>,
    /// Indentation of the uncommented head
    indent: usize,
    /// Column of the head's comment marker, or where it goes
    column: usize,
    /// `- item` lines at the head's own indentation belong to the group
    sequence_items: bool,
}

impl Group {
    fn open(view: &LineView<'_>, key: &str, action: Action) -> Self {
        let applies = match action {
            Action::Comment => !view.is_commented(),
            Action::Uncomment => view.is_commented(),
        };
        Group {
            action: applies.then_some(action),
            indent: view.indent(),
            column: leading_ws(view.raw()).len(),
            sequence_items: key == VOLUMES,
        }
    }

    fn contains(&self, view: &LineView<'_>) -> bool {
        let indent = view.indent();
        indent > self.indent
            || (self.sequence_items && indent == self.indent && is_sequence_item(view.payload()))
    }

    /// Rewrite a member line.
    ///
    /// Commenting prefixes every line, comments included, so uncommenting can
    /// strip exactly one marker: the one at the head's column.
    fn apply(&self, view: &LineView<'_>, style: CommentStyle) -> String {
        match self.action {
            Some(Action::Comment) => style.comment(view.raw(), self.column),
            Some(Action::Uncomment)
                if view.is_commented() && leading_ws(view.raw()).len() == self.column =>
            {
                view.payload().to_string()
            }
            _ => view.raw().to_string(),
        }
    }
}

fn is_sequence_item(line: &str) -> bool {
    let body = line.trim();
    body == "-" || body.starts_with("- ")
}

/// Rewrite `block`, currently in `mode`, so the opposite group is active.
///
/// Every line is visited once; lines outside the two directive groups are
/// copied verbatim, and the block's existing comment style is reused so that
/// toggling twice restores the original text. Inconsistent blocks (both
/// groups active, say) are not rejected: a head already in the requested
/// state is left alone together with its children.
pub fn toggle(block: &str, mode: Mode) -> String {
    let style = comment_style(block);
    let deactivate = mode.keys();
    let activate = mode.opposite().keys();

    let mut out = String::with_capacity(block.len() + 16);
    let mut group: Option<Group> = None;

    for line in block.split_inclusive('\n') {
        let (raw, eol) = split_eol(line);
        let view = LineView::parse(raw, style);
        if view.is_blank() {
            out.push_str(line);
            continue;
        }

        if let Some(g) = group.filter(|g| g.contains(&view)) {
            out.push_str(&g.apply(&view, style));
            out.push_str(eol);
            continue;
        }

        group = view.directive().and_then(|key| {
            if deactivate.contains(&key) {
                Some(Group::open(&view, key, Action::Comment))
            } else if activate.contains(&key) {
                Some(Group::open(&view, key, Action::Uncomment))
            } else {
                None
            }
        });

        match group {
            Some(g) => out.push_str(&g.apply(&view, style)),
            None => out.push_str(raw),
        }
        out.push_str(eol);
    }

    out
}
