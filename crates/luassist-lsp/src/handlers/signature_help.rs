use luassist_catalog::{CompletionKind, CompletionProvider};
use tower_lsp::lsp_types::*;

use crate::document::Document;

/// Get signature help for a position in the document
pub fn get_signature_help(
    doc: &Document,
    position: Position,
    provider: &CompletionProvider,
) -> Option<SignatureHelp> {
    let text = doc.text_before(position.line, position.character);

    // Find the function call we're inside
    let (func_name, param_index) = find_function_call_context(text)?;

    // Get the signature from the catalog (static before dynamic)
    let entry = provider.function_signature(&func_name)?;
    let label = entry.signature_line()?;
    let parameters = match &entry.kind {
        CompletionKind::FunctionSignature { parameters, .. } => parameters.clone(),
        _ => return None,
    };

    let parameter_infos: Vec<ParameterInformation> = parameters
        .iter()
        .map(|p| ParameterInformation {
            label: ParameterLabel::Simple(p.clone()),
            documentation: None,
        })
        .collect();

    let signature_info = SignatureInformation {
        label,
        documentation: Some(Documentation::String(entry.short_description.clone())),
        parameters: Some(parameter_infos),
        active_parameter: Some(param_index as u32),
    };

    Some(SignatureHelp {
        signatures: vec![signature_info],
        active_signature: Some(0),
        active_parameter: Some(param_index as u32),
    })
}

/// Find the function name and active parameter index for the innermost
/// unclosed call at the end of `text`
fn find_function_call_context(text: &str) -> Option<(String, usize)> {
    let chars: Vec<char> = text.chars().collect();
    let cursor = chars.len();

    // Search backwards from the cursor to find the unclosed parenthesis
    let mut depth = 0;
    let mut paren_pos = None;

    for i in (0..cursor).rev() {
        match chars[i] {
            ')' => depth += 1,
            '(' => {
                if depth == 0 {
                    paren_pos = Some(i);
                    break;
                } else {
                    depth -= 1;
                }
            }
            _ => {}
        }
    }

    let open_paren = paren_pos?;

    // Extract the callee name (immediately before the opening parenthesis)
    let mut func_end = open_paren;
    while func_end > 0 && chars[func_end - 1].is_whitespace() {
        func_end -= 1;
    }

    let mut func_start = func_end;
    while func_start > 0 && is_name_char(chars[func_start - 1]) {
        func_start -= 1;
    }

    if func_start >= func_end {
        return None;
    }

    let func_name: String = chars[func_start..func_end].iter().collect();
    let param_index = count_arguments(&chars, open_paren, cursor);

    Some((func_name, param_index))
}

/// Count the commas between the opening parenthesis and the cursor,
/// ignoring commas nested in brackets or string literals
fn count_arguments(chars: &[char], open_paren: usize, cursor: usize) -> usize {
    let mut count = 0;
    let mut depth = 0;
    let mut in_string: Option<char> = None;
    let mut escape_next = false;

    for &ch in &chars[open_paren + 1..cursor.min(chars.len())] {
        if escape_next {
            escape_next = false;
            continue;
        }

        if let Some(quote) = in_string {
            match ch {
                '\\' => escape_next = true,
                c if c == quote => in_string = None,
                _ => {}
            }
            continue;
        }

        match ch {
            '\'' | '"' => in_string = Some(ch),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                if depth > 0 {
                    depth -= 1;
                }
            }
            ',' if depth == 0 => count += 1,
            _ => {}
        }
    }

    count
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.' || c == ':'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_function_call_simple() {
        assert_eq!(
            find_function_call_context("print("),
            Some(("print".to_string(), 0))
        );
    }

    #[test]
    fn test_find_function_call_with_first_arg() {
        assert_eq!(
            find_function_call_context("string.sub(s, "),
            Some(("string.sub".to_string(), 1))
        );
    }

    #[test]
    fn test_find_function_call_nested() {
        assert_eq!(
            find_function_call_context("math.max(math.abs(x), "),
            Some(("math.max".to_string(), 1))
        );
    }

    #[test]
    fn test_method_call_name_keeps_colon() {
        assert_eq!(
            find_function_call_context("Domain:refine("),
            Some(("Domain:refine".to_string(), 0))
        );
    }

    #[test]
    fn test_commas_in_strings_do_not_count() {
        assert_eq!(
            find_function_call_context("string.format(\"a,b,c\", "),
            Some(("string.format".to_string(), 1))
        );
    }

    #[test]
    fn test_commas_in_table_constructor_do_not_count() {
        assert_eq!(
            find_function_call_context("table.concat({1, 2, 3}, "),
            Some(("table.concat".to_string(), 1))
        );
    }

    #[test]
    fn test_escaped_quote_in_string() {
        assert_eq!(
            find_function_call_context("f(\"a\\\"b,c\", "),
            Some(("f".to_string(), 1))
        );
    }

    #[test]
    fn test_no_open_call() {
        assert!(find_function_call_context("x = 1 + 2").is_none());
        assert!(find_function_call_context("print(x)").is_none());
    }

    #[test]
    fn test_signature_help_for_known_function() {
        let doc = Document::new("string.sub(s, ".to_string());
        let provider = CompletionProvider::new();
        let help = get_signature_help(&doc, Position::new(0, 14), &provider).unwrap();
        assert_eq!(help.signatures.len(), 1);
        assert_eq!(help.signatures[0].label, "string string.sub(s,i,j)");
        assert_eq!(help.active_parameter, Some(1));
    }

    #[test]
    fn test_signature_help_unknown_function() {
        let doc = Document::new("no_such_fn(".to_string());
        let provider = CompletionProvider::new();
        assert!(get_signature_help(&doc, Position::new(0, 11), &provider).is_none());
    }

    #[test]
    fn test_signature_help_multiline_call() {
        let doc = Document::new("string.format(\n  \"x\",\n  ".to_string());
        let provider = CompletionProvider::new();
        let help = get_signature_help(&doc, Position::new(2, 2), &provider).unwrap();
        assert_eq!(help.active_parameter, Some(1));
    }
}
