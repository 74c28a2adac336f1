//! Service-block editing for docker-compose files
//!
//! Locates a service's block by indentation alone, flips it between running
//! a prebuilt image and building from source, and reports the line-level
//! changes. Everything outside the touched lines is preserved byte for byte.

pub mod block;
pub mod context;
pub mod diff;
pub mod directive;
pub mod document;
pub mod edit;
pub mod error;
pub mod tag;

pub use block::{ServiceBlock, extract_block, extract_service, service_names};
pub use context::build_context;
pub use diff::{ChangeKind, ChangeReport, LineChange};
pub use directive::{CommentStyle, LineView, Mode, classify, toggle};
pub use document::{ComposeDocument, Toggle};
pub use edit::Edit;
pub use error::{Error, Result};
pub use tag::{compile_patterns, retag_images, split_reference};
