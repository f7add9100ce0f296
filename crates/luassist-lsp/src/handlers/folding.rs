use luassist_catalog::CompletionProvider;
use tower_lsp::lsp_types::*;

use crate::document::Document;

/// Get folding ranges for every multi-line block in the document
pub fn get_folding_ranges(doc: &Document, provider: &CompletionProvider) -> Vec<FoldingRange> {
    provider
        .fold_regions(doc.text())
        .into_iter()
        .map(|region| FoldingRange {
            start_line: region.start_line,
            start_character: None,
            end_line: region.end_line,
            end_character: None,
            kind: Some(FoldingRangeKind::Region),
            collapsed_text: None,
        })
        .collect()
}
