//! The query surface over the merged completion catalog.

use std::sync::Arc;

use parking_lot::RwLock;

use luassist_scanner::{error_markers, fold_regions, ErrorMarker, FoldRegion, RuntimeDiagnostic};

use crate::api::{load_dynamic, DeclarationSource};
use crate::entry::{CompletionEntry, CompletionKind, Origin};
use crate::error::{ConfigurationError, MalformedEntryWarning};
use crate::table::static_entries;

/// The merged, insertion-ordered completion index.
///
/// Static entries are built once at construction; the dynamic portion is an
/// immutable snapshot replaced wholesale by [`replace_dynamic`]. Readers
/// clone the snapshot handle and therefore observe either the full pre- or
/// the full post-reload set, never a mixture.
///
/// [`replace_dynamic`]: CompletionCatalog::replace_dynamic
pub struct CompletionCatalog {
    statics: Vec<CompletionEntry>,
    dynamics: RwLock<Arc<[CompletionEntry]>>,
}

impl CompletionCatalog {
    /// Catalog seeded with the embedded static table and no dynamic entries.
    pub fn new() -> Self {
        Self::with_static(static_entries().to_vec())
    }

    /// Catalog over a caller-supplied static set.
    pub fn with_static(statics: Vec<CompletionEntry>) -> Self {
        Self {
            statics,
            dynamics: RwLock::new(Arc::from(Vec::new())),
        }
    }

    pub fn static_entries(&self) -> &[CompletionEntry] {
        &self.statics
    }

    /// Handle on the current dynamic snapshot.
    pub fn dynamic_snapshot(&self) -> Arc<[CompletionEntry]> {
        self.dynamics.read().clone()
    }

    /// Replace every `Dynamic`-origin entry with `entries`, atomically with
    /// respect to readers. Static entries are never disturbed.
    pub fn replace_dynamic(&self, entries: Vec<CompletionEntry>) {
        let snapshot: Arc<[CompletionEntry]> = entries.into();
        *self.dynamics.write() = snapshot;
    }

    /// Every entry sharing `input_text`, static before dynamic. The catalog
    /// is keyed one-to-many: overloads legally share an input text.
    pub fn lookup(&self, input_text: &str) -> Vec<CompletionEntry> {
        let dynamics = self.dynamic_snapshot();
        self.statics
            .iter()
            .chain(dynamics.iter())
            .filter(|entry| entry.input_text == input_text)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.statics.len() + self.dynamic_snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CompletionCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// The four calls an editor front-end needs: `complete`, `parameter_hint`,
/// `fold_regions`, `error_markers`. Owns the catalog for its lifetime.
pub struct CompletionProvider {
    catalog: CompletionCatalog,
}

impl CompletionProvider {
    pub fn new() -> Self {
        Self {
            catalog: CompletionCatalog::new(),
        }
    }

    pub fn with_catalog(catalog: CompletionCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CompletionCatalog {
        &self.catalog
    }

    /// Entries whose input text starts with the identifier fragment ending
    /// `text_before_caret`. Case-sensitive. An empty fragment matches every
    /// entry. Static entries come first, then dynamic, each in original
    /// table/file order.
    pub fn complete(&self, text_before_caret: &str) -> Vec<CompletionEntry> {
        let fragment = trailing_fragment(text_before_caret);
        let dynamics = self.catalog.dynamic_snapshot();
        self.catalog
            .static_entries()
            .iter()
            .chain(dynamics.iter())
            .filter(|entry| entry.input_text.starts_with(fragment))
            .cloned()
            .collect()
    }

    /// Name of the active parameter while typing inside a call, or empty
    /// when the function is unknown or the index is past its last
    /// parameter. The first matching signature (static before dynamic)
    /// with enough parameters wins.
    pub fn parameter_hint(&self, function_name: &str, arg_index: usize) -> String {
        self.catalog
            .lookup(function_name)
            .into_iter()
            .find_map(|entry| match entry.kind {
                CompletionKind::FunctionSignature { parameters, .. } => {
                    parameters.get(arg_index).cloned()
                }
                _ => None,
            })
            .unwrap_or_default()
    }

    /// First function-signature entry for `function_name`, static before
    /// dynamic; drives signature help in the front-end.
    pub fn function_signature(&self, function_name: &str) -> Option<CompletionEntry> {
        self.catalog
            .lookup(function_name)
            .into_iter()
            .find(|entry| matches!(entry.kind, CompletionKind::FunctionSignature { .. }))
    }

    /// Fold regions of `text`; see [`luassist_scanner::fold_regions`].
    pub fn fold_regions(&self, text: &str) -> Vec<FoldRegion> {
        fold_regions(text)
    }

    /// Error markers for a runtime diagnostic against `text`; see
    /// [`luassist_scanner::error_markers`].
    pub fn error_markers(
        &self,
        text: &str,
        diagnostic: Option<RuntimeDiagnostic>,
    ) -> Vec<ErrorMarker> {
        error_markers(text, diagnostic)
    }

    /// Load `source` and, on success, swap the catalog's dynamic portion
    /// for the result. On failure the catalog is left exactly as it was.
    /// Returns the per-line warnings collected during the load.
    pub fn reload_dynamic(
        &self,
        source: &dyn DeclarationSource,
    ) -> Result<Vec<MalformedEntryWarning>, ConfigurationError> {
        let loaded = load_dynamic(source)?;
        self.catalog.replace_dynamic(loaded.entries);
        Ok(loaded.warnings)
    }
}

impl Default for CompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// The trailing identifier fragment of the text before the caret: the
/// longest suffix of identifier characters (including `.` and `:` so
/// qualified names like `string.for` keep their prefix).
fn trailing_fragment(text: &str) -> &str {
    let start = text
        .rfind(|c: char| !is_fragment_char(c))
        .map(|i| i + text[i..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(0);
    &text[start..]
}

fn is_fragment_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == ':'
}
