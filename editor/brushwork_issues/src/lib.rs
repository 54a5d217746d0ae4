//! Issue registry for the Brushwork map editor.
//!
//! Validators inspect the edited document and report [`Issue`]s; the
//! [`IssueRegistry`] keeps them in one ordered list that stays correct as the
//! document changes under interactive editing:
//! - Issues are ordered by severity, kind and subject
//! - Equivalent issues collapse into a group instead of repeating
//! - Groups shrink and dissolve as their issues are fixed
//! - Removal by subject is a no-op for nodes with no issues
//!
//! # Storage
//!
//! Nodes live in an [`IssueArena`] and are linked by [`IssueId`] handles.
//! Each node has one link pair for the top-level list and one for a group's
//! sublist, and is in exactly one of three states: unlinked, top-level, or
//! grouped.
//!
//! ```no_run
//! use brushwork_issues::{Issue, IssueKind, IssueRegistry, LinkError};
//! use brushwork_model::NodeId;
//!
//! fn main() -> Result<(), LinkError> {
//!     let brush = NodeId::new(1);
//!     let mut registry = IssueRegistry::new();
//!     registry.insert(Issue::new(brush, IssueKind::NonIntegerPlanePoints))?;
//!     registry.insert(Issue::new(brush, IssueKind::NonIntegerPlanePoints))?;
//!     // One entry: "2 issues: Brush has non-integer plane points"
//!     for entry in registry.iter() {
//!         println!("{}", entry.as_string());
//!     }
//!     Ok(())
//! }
//! ```

mod arena;
mod error;
mod id;
mod issue;
mod node;
pub mod registry;
mod validator;
mod view;

use std::sync::Once;

pub use arena::{IssueArena, Iter, MergeOutcome};
pub use error::LinkError;
pub use id::IssueId;
pub use issue::{Issue, IssueKind, MergeRule, Severity};
pub use node::{IssueGroup, IssueNode, Links, List, NodeBody};
pub use registry::{IssueRegistry, RegistryConfig};
pub use validator::Validator;
pub use view::IssueRef;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for registry diagnostics.
///
/// Does nothing unless `RUST_LOG` is set; repeated calls are no-ops.
/// Levels used by this crate:
/// - `error`: a list contract was violated (the call returned a [`LinkError`])
/// - `warn`: a validator reported an issue for another node or an undeclared type
/// - `debug`: merges, group promotion and dissolution, bulk removal by subject
/// - `trace`: every individual link, unlink and replacement
///
/// `RUST_LOG=brushwork_issues=debug` follows grouping decisions without the
/// per-link noise of `trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
