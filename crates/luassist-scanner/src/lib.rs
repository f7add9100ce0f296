//! Lexical layer for Lua code intelligence
//!
//! This crate provides the three pure text-level services that feed an
//! editing surface:
//!
//! - **Token scanning**: a failure-tolerant walk over Lua source that
//!   recognizes comments, string literals and block keywords
//! - **Fold detection**: collapsible line ranges for nested blocks
//! - **Error markers**: mapping a runtime diagnostic back to a line/column
//!
//! All three are stateless per call and reentrant; they may run on every
//! text-change event. Malformed input degrades the results, it never fails.
//!
//! # Example
//!
//! ```
//! use luassist_scanner::fold_regions;
//!
//! let regions = fold_regions("function f()\n  return 1\nend\n");
//! assert_eq!(regions.len(), 1);
//! ```

pub mod fold;
pub mod marker;
pub mod scanner;
pub mod token;

// Re-export the service entry points for convenience
pub use fold::{detect_folds, fold_regions, FoldOutcome, FoldRegion, UnbalancedBlockWarning};
pub use marker::{error_markers, line_col_at, ErrorMarker, RuntimeDiagnostic};
pub use scanner::scan;
pub use token::{BlockTag, Token, TokenKind};
