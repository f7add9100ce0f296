//! Completion catalog engine for embedded Lua scripting
//!
//! This crate turns two inputs into one queryable index of completions:
//!
//! - an embedded, versioned **static table** of encoded rows (keywords,
//!   code-template shorthands, stdlib function signatures), compiled once
//!   at startup
//! - a host-supplied **API description file** (functions, classes,
//!   constants, with `include` cross-references resolved against a root
//!   directory), reloadable at any time
//!
//! The [`CompletionProvider`] owns the merged catalog and answers the four
//! calls an editor front-end needs: `complete`, `parameter_hint`,
//! `fold_regions` and `error_markers`. Reloading the dynamic portion swaps
//! an immutable snapshot, so readers always observe a full pre- or
//! post-reload set.
//!
//! # Example
//!
//! ```
//! use luassist_catalog::CompletionProvider;
//!
//! let provider = CompletionProvider::new();
//! let entries = provider.complete("local x = pri");
//! assert!(entries.iter().any(|e| e.input_text == "print"));
//! ```

pub mod api;
pub mod compiler;
pub mod entry;
pub mod error;
pub mod provider;
pub mod table;

pub use api::{load_dynamic, ApiDescription, ApiFile, DeclarationSource, LoadedApi, RawDeclaration};
pub use compiler::{compile, CompiledTable, Row, TableGroup};
pub use entry::{CompletionEntry, CompletionKind, Origin};
pub use error::{ConfigurationError, MalformedEntryWarning, MalformedRowWarning};
pub use provider::{CompletionCatalog, CompletionProvider};
pub use table::{static_entries, ROOT_TABLE, STATIC_GROUPS};
