//! Compose document: original text plus an evolving working copy

use regex::Regex;
use serde::Serialize;

use crate::block::{ServiceBlock, extract_service, service_names};
use crate::diff::ChangeReport;
use crate::directive::{Mode, classify, toggle};
use crate::edit::Edit;
use crate::error::{Error, Result};
use crate::tag::retag_images;

/// Outcome of toggling one service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toggle {
    pub service: String,
    /// Mode the service was in before the toggle
    pub from: Mode,
    /// Mode the service is in now, equal to `from` when nothing was rewritten
    pub to: Mode,
    /// `None` when the block had nothing to rewrite
    pub edit: Option<Edit>,
}

/// A compose file held in memory for one invocation.
///
/// Service blocks are always located in the original text; rewritten blocks
/// are spliced into the working copy at their original position, shifted by
/// the length changes of earlier splices.
#[derive(Debug, Clone)]
pub struct ComposeDocument {
    original: String,
    source: String,
    /// Original end offset and length change of every anchored splice
    shifts: Vec<(usize, isize)>,
    /// Cleared once the working copy changed in a way `shifts` cannot track
    anchored: bool,
}

impl ComposeDocument {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            original: source.clone(),
            source,
            shifts: Vec::new(),
            anchored: true,
        }
    }

    /// Text as it was read.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Current working copy.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn into_source(self) -> String {
        self.source
    }

    /// Check if the working copy differs from the original text.
    pub fn is_modified(&self) -> bool {
        self.source != self.original
    }

    /// Service names declared in the original text.
    pub fn service_names(&self) -> Vec<String> {
        service_names(&self.original)
    }

    /// Locate a service's block in the original text.
    pub fn block(&self, service: &str) -> Result<ServiceBlock> {
        extract_service(&self.original, service).ok_or_else(|| Error::service_not_found(service))
    }

    /// Replace the first occurrence of `original_block` in the working copy.
    ///
    /// Identical texts are a no-op and yield `None`. The search is textual:
    /// if the same text appears earlier in the document, as an identical
    /// block or as a substring of a longer one, that earlier occurrence is the
    /// one replaced. [`ComposeDocument::patch_block`] avoids this.
    pub fn patch(
        &mut self,
        service: &str,
        original_block: &str,
        new_block: &str,
    ) -> Result<Option<Edit>> {
        if original_block == new_block {
            return Ok(None);
        }

        let start = self.find_block(service, original_block)?;
        self.anchored = false;
        Ok(Some(self.splice(service, start, original_block, new_block)))
    }

    /// Replace `block` (extracted from the original text) at its own position.
    ///
    /// Falls back to the textual search of [`ComposeDocument::patch`] when the
    /// working copy no longer holds the block where it is expected.
    pub fn patch_block(&mut self, block: &ServiceBlock, new_content: &str) -> Result<Option<Edit>> {
        if block.content == new_content {
            return Ok(None);
        }

        let Some(start) = self.working_offset(block) else {
            return self.patch(&block.key, &block.content, new_content);
        };

        let edit = self.splice(&block.key, start, &block.content, new_content);
        let delta = new_content.len() as isize - block.content.len() as isize;
        self.shifts.push((block.span.end, delta));
        Ok(Some(edit))
    }

    /// Where `block` sits in the working copy, if it is still there unchanged.
    fn working_offset(&self, block: &ServiceBlock) -> Option<usize> {
        if !self.anchored {
            return None;
        }
        let delta: isize = self
            .shifts
            .iter()
            .filter(|(end, _)| *end <= block.span.start)
            .map(|(_, delta)| delta)
            .sum();
        let start = block.span.start.checked_add_signed(delta)?;
        let end = start.checked_add(block.content.len())?;
        (self.source.get(start..end) == Some(block.content.as_str())).then_some(start)
    }

    fn find_block(&self, service: &str, text: &str) -> Result<usize> {
        self.source
            .find(text)
            .ok_or_else(|| Error::PatchTargetMissing {
                service: service.to_string(),
            })
    }

    fn splice(&mut self, service: &str, start: usize, old: &str, new: &str) -> Edit {
        let edit = Edit {
            span: start..start + old.len(),
            old_content: old.to_string(),
            new_content: new.to_string(),
        };
        self.source = edit.apply(&self.source);

        tracing::debug!(service = %service, span = ?edit.span, "patched service block");
        edit
    }

    /// Flip the active directive group of one service.
    ///
    /// A block without `image:`, `build:` or `volumes:` directives is left as
    /// is; the returned toggle then has no edit and `to == from`.
    pub fn toggle_service(&mut self, service: &str) -> Result<Toggle> {
        let block = self.block(service)?;
        let from = classify(&block.content);
        let rewritten = toggle(&block.content, from);
        let edit = self.patch_block(&block, &rewritten)?;

        let to = if edit.is_some() {
            from.opposite()
        } else {
            tracing::warn!(service = %service, "no image, build or volumes directives to switch");
            from
        };

        Ok(Toggle {
            service: service.to_string(),
            from,
            to,
            edit,
        })
    }

    /// Toggle several services in order, stopping at the first failure.
    ///
    /// Repeated names are toggled once.
    pub fn switch_services<S: AsRef<str>>(&mut self, services: &[S]) -> Result<Vec<Toggle>> {
        let mut toggles: Vec<Toggle> = Vec::with_capacity(services.len());
        for service in services {
            let service = service.as_ref();
            if toggles.iter().any(|t| t.service == service) {
                tracing::warn!(service = %service, "service listed more than once, skipping");
                continue;
            }
            toggles.push(self.toggle_service(service)?);
        }
        Ok(toggles)
    }

    /// Rewrite image tags in the working copy. Returns whether anything changed.
    pub fn retag(&mut self, patterns: &[Regex], tag: Option<&str>) -> bool {
        let retagged = retag_images(&self.source, patterns, tag);
        let changed = retagged != self.source;
        if changed {
            self.anchored = false;
        }
        self.source = retagged;
        changed
    }

    /// Line diff between the original text and the working copy.
    pub fn report(&self) -> ChangeReport {
        ChangeReport::compute(&self.original, &self.source)
    }
}
