use luassist_catalog::{CompletionEntry, CompletionKind, CompletionProvider, Origin};
use tower_lsp::lsp_types::*;

use crate::document::Document;

/// Get completion items for a position in the document
pub fn get_completions(
    doc: &Document,
    position: Position,
    provider: &CompletionProvider,
) -> Vec<CompletionItem> {
    provider
        .complete(doc.text_before(position.line, position.character))
        .into_iter()
        .map(to_lsp_item)
        .collect()
}

/// Convert a catalog entry to an LSP completion item
fn to_lsp_item(entry: CompletionEntry) -> CompletionItem {
    let kind = match (&entry.kind, entry.origin) {
        (CompletionKind::Basic, Origin::Static) => CompletionItemKind::KEYWORD,
        // dynamic basics are host classes and constants
        (CompletionKind::Basic, Origin::Dynamic) => CompletionItemKind::CONSTANT,
        (CompletionKind::ShorthandTemplate, _) => CompletionItemKind::SNIPPET,
        (CompletionKind::FunctionSignature { .. }, _) => CompletionItemKind::FUNCTION,
    };

    CompletionItem {
        label: entry.input_text,
        kind: Some(kind),
        detail: Some(entry.short_description),
        documentation: Some(Documentation::String(entry.long_summary)),
        insert_text: Some(entry.replacement_text),
        ..Default::default()
    }
}
