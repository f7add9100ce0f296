use tower_lsp::lsp_types::*;

/// Define the server capabilities for the luassist LSP
pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        // Full text sync - simplest to implement
        text_document_sync: Some(TextDocumentSyncCapability::Kind(
            TextDocumentSyncKind::FULL,
        )),

        // Completion over the merged static + host-API catalog
        completion_provider: Some(CompletionOptions {
            trigger_characters: Some(vec![".".to_string(), ":".to_string()]),
            ..Default::default()
        }),

        // Signature help (function parameter hints)
        signature_help_provider: Some(SignatureHelpOptions {
            trigger_characters: Some(vec!["(".to_string(), ",".to_string()]),
            retrigger_characters: Some(vec![",".to_string()]),
            work_done_progress_options: Default::default(),
        }),

        // Fold regions for nested blocks
        folding_range_provider: Some(FoldingRangeProviderCapability::Simple(true)),

        // Runtime diagnostics are pushed via publishDiagnostics when the
        // host reports a failed run (no special capability needed)

        ..Default::default()
    }
}
