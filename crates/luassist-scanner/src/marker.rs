/// A diagnostic as reported by the scripting runtime after a failed run.
/// The offset, when present, is a flat character offset into the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeDiagnostic {
    pub message: String,
    pub offset: Option<usize>,
}

/// An inline error marker, 0-based line and column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorMarker {
    pub line: u32,
    pub column: u32,
    pub message: String,
}

/// Map a runtime diagnostic onto the source text.
///
/// Produces exactly one marker per diagnostic, none when there is no
/// diagnostic. A missing offset falls back to line 0, column 0 with the
/// message attached verbatim; an offset past the end of the text clamps to
/// the final position. Never fails.
pub fn error_markers(source: &str, diagnostic: Option<RuntimeDiagnostic>) -> Vec<ErrorMarker> {
    let Some(diagnostic) = diagnostic else {
        return Vec::new();
    };
    let (line, column) = match diagnostic.offset {
        Some(offset) => line_col_at(source, offset),
        None => (0, 0),
    };
    vec![ErrorMarker {
        line,
        column,
        message: diagnostic.message,
    }]
}

/// Line and column of a flat character offset, found by re-walking the text
/// and counting newlines.
pub fn line_col_at(source: &str, offset: usize) -> (u32, u32) {
    let mut line = 0u32;
    let mut column = 0u32;
    for (index, ch) in source.chars().enumerate() {
        if index >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    (line, column)
}
