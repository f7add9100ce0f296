use luassist_scanner::ErrorMarker;
use tower_lsp::lsp_types::*;

/// Convert an error marker from the catalog engine into an LSP diagnostic
pub fn marker_to_diagnostic(marker: ErrorMarker) -> Diagnostic {
    Diagnostic {
        range: Range {
            start: Position {
                line: marker.line,
                character: marker.column,
            },
            end: Position {
                line: marker.line,
                character: marker.column + 1,
            },
        },
        severity: Some(DiagnosticSeverity::ERROR),
        code: Some(NumberOrString::String("runtime-error".to_string())),
        source: Some("luassist".to_string()),
        message: marker.message,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_maps_to_single_character_range() {
        let diagnostic = marker_to_diagnostic(ErrorMarker {
            line: 3,
            column: 7,
            message: "attempt to call a nil value".to_string(),
        });
        assert_eq!(diagnostic.range.start, Position { line: 3, character: 7 });
        assert_eq!(diagnostic.range.end, Position { line: 3, character: 8 });
        assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::ERROR));
        assert_eq!(diagnostic.message, "attempt to call a nil value");
    }
}
