//! The data model for a single completion suggestion.

use std::fmt::Write;

/// Provenance of an entry: built-in table or host-supplied API description.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Static,
    Dynamic,
}

/// The closed set of completion shapes. The `BC`/`SH`/`PC` tags of the
/// encoded table format exist only at the deserialization boundary; inside
/// the catalog every entry is one of these variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    /// A plain word completion (keyword, constant, class name).
    Basic,
    /// A completion whose accepted insertion is a multi-token code skeleton,
    /// distinct from the trigger text.
    ShorthandTemplate,
    /// A callable with a declared return type and ordered parameter names.
    FunctionSignature {
        /// Declared return type, empty for void.
        return_type: String,
        parameters: Vec<String>,
    },
}

/// One suggested insertion offered to the user while editing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionEntry {
    pub kind: CompletionKind,
    /// What the user types to trigger the entry. Not unique: overloads may
    /// share an input text.
    pub input_text: String,
    /// Inserted on acceptance; equals `input_text` except for shorthands.
    pub replacement_text: String,
    /// One-liner for the suggestion list.
    pub short_description: String,
    /// Rendered rich-text summary for the description window.
    pub long_summary: String,
    pub origin: Origin,
}

impl CompletionEntry {
    pub fn basic(
        input_text: &str,
        short_description: &str,
        long_summary: &str,
        origin: Origin,
    ) -> Self {
        Self {
            kind: CompletionKind::Basic,
            input_text: input_text.to_string(),
            replacement_text: input_text.to_string(),
            short_description: short_description.to_string(),
            long_summary: long_summary.to_string(),
            origin,
        }
    }

    pub fn shorthand(
        input_text: &str,
        replacement_text: &str,
        short_description: &str,
        origin: Origin,
    ) -> Self {
        Self {
            kind: CompletionKind::ShorthandTemplate,
            input_text: input_text.to_string(),
            replacement_text: replacement_text.to_string(),
            short_description: short_description.to_string(),
            long_summary: short_description.to_string(),
            origin,
        }
    }

    pub fn function(
        name: &str,
        summary: &str,
        return_type: &str,
        parameters: Vec<String>,
        origin: Origin,
    ) -> Self {
        let long_summary = render_function_summary(return_type, name, &parameters, summary);
        Self {
            kind: CompletionKind::FunctionSignature {
                return_type: return_type.to_string(),
                parameters,
            },
            input_text: name.to_string(),
            replacement_text: name.to_string(),
            short_description: summary.to_string(),
            long_summary,
            origin,
        }
    }

    /// Plain one-line signature, e.g. `void test(a,b,c)`, for function
    /// entries; `None` for the other kinds.
    pub fn signature_line(&self) -> Option<String> {
        match &self.kind {
            CompletionKind::FunctionSignature {
                return_type,
                parameters,
            } => Some(signature_text(return_type, &self.input_text, parameters)),
            _ => None,
        }
    }
}

pub(crate) fn signature_text(return_type: &str, name: &str, parameters: &[String]) -> String {
    let mut text = String::new();
    if !return_type.is_empty() {
        text.push_str(return_type);
        text.push(' ');
    }
    text.push_str(name);
    text.push('(');
    text.push_str(&parameters.join(","));
    text.push(')');
    text
}

/// Render the rich-text summary of a function entry.
///
/// The output format is fixed: the signature line in emphasis, a rule, the
/// summary text, then a Parameters table listing each name on its own line.
/// With zero parameters the whole Parameters section is omitted. Rendering
/// the same inputs always yields identical output.
pub fn render_function_summary(
    return_type: &str,
    name: &str,
    parameters: &[String],
    summary: &str,
) -> String {
    let mut html = String::from("<html><b>");
    html.push_str(&signature_text(return_type, name, parameters));
    html.push_str("</b><hr><br>");
    html.push_str(summary);
    html.push_str("<br><br>");
    if !parameters.is_empty() {
        html.push_str("<br><b>Parameters:</b><br><center><table width='90%'><tr><td>");
        for parameter in parameters {
            let _ = write!(html, "<b>{}</b>&nbsp;<br>", parameter);
        }
        html.push_str("</td></tr></table></center><br><br>");
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_render_with_parameters_exact() {
        let html = render_function_summary("void", "test", &params(&["a", "b", "c"]), "summary");
        assert_eq!(
            html,
            "<html><b>void test(a,b,c)</b><hr><br>summary<br><br><br><b>Parameters:</b>\
             <br><center><table width='90%'><tr><td><b>a</b>&nbsp;<br><b>b</b>&nbsp;<br>\
             <b>c</b>&nbsp;<br></td></tr></table></center><br><br>"
        );
    }

    #[test]
    fn test_render_without_parameters_omits_section() {
        let html = render_function_summary("number", "rnd", &[], "a random number");
        assert_eq!(html, "<html><b>number rnd()</b><hr><br>a random number<br><br>");
        assert!(!html.contains("Parameters"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let first = render_function_summary("void", "f", &params(&["x"]), "s");
        let second = render_function_summary("void", "f", &params(&["x"]), "s");
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_return_type_drops_leading_space() {
        let html = render_function_summary("", "f", &params(&["x"]), "s");
        assert!(html.starts_with("<html><b>f(x)</b>"));
    }

    #[test]
    fn test_basic_entry_replacement_equals_input() {
        let entry = CompletionEntry::basic("for", "for-loop", "<b>summary", Origin::Static);
        assert_eq!(entry.replacement_text, entry.input_text);
        assert_eq!(entry.long_summary, "<b>summary");
    }

    #[test]
    fn test_shorthand_entry_keeps_distinct_replacement() {
        let entry = CompletionEntry::shorthand(
            "for",
            "for i=1,10 do end",
            "bigger for-loop",
            Origin::Static,
        );
        assert_eq!(entry.input_text, "for");
        assert_eq!(entry.replacement_text, "for i=1,10 do end");
        assert_ne!(entry.replacement_text, entry.input_text);
    }

    #[test]
    fn test_signature_line() {
        let entry = CompletionEntry::function(
            "test",
            "summary",
            "void",
            params(&["a", "b", "c"]),
            Origin::Static,
        );
        assert_eq!(entry.signature_line().as_deref(), Some("void test(a,b,c)"));

        let basic = CompletionEntry::basic("x", "y", "z", Origin::Static);
        assert!(basic.signature_line().is_none());
    }
}
