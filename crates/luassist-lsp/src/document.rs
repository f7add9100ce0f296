/// Represents an open document in the LSP server
pub struct Document {
    /// The current text content of the document
    text: String,
    /// Lines of the document (cached for position calculations)
    lines: Vec<String>,
}

impl Document {
    pub fn new(text: String) -> Self {
        let lines = text.lines().map(|s| s.to_string()).collect();
        Self { text, lines }
    }

    pub fn update_text(&mut self, new_text: String) {
        self.lines = new_text.lines().map(|s| s.to_string()).collect();
        self.text = new_text;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get byte offset from position
    pub fn offset_from_position(&self, line: u32, character: u32) -> usize {
        let mut offset = 0;
        for (idx, l) in self.lines.iter().enumerate() {
            if idx == line as usize {
                offset += (character as usize).min(l.len());
                break;
            }
            offset += l.len() + 1; // +1 for newline
        }
        offset
    }

    /// The text from the start of the document up to the caret.
    pub fn text_before(&self, line: u32, character: u32) -> &str {
        let mut offset = self
            .offset_from_position(line, character)
            .min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        &self.text[..offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_from_position() {
        let doc = Document::new("ab\ncdef\ng".to_string());
        assert_eq!(doc.offset_from_position(0, 0), 0);
        assert_eq!(doc.offset_from_position(0, 2), 2);
        assert_eq!(doc.offset_from_position(1, 1), 4);
        assert_eq!(doc.offset_from_position(2, 0), 8);
    }

    #[test]
    fn test_offset_clamps_past_line_end() {
        let doc = Document::new("ab\ncd".to_string());
        assert_eq!(doc.offset_from_position(0, 99), 2);
    }

    #[test]
    fn test_text_before() {
        let doc = Document::new("local x = pri\nnext line".to_string());
        assert_eq!(doc.text_before(0, 13), "local x = pri");
        assert_eq!(doc.text_before(0, 5), "local");
        assert_eq!(doc.text_before(1, 4), "local x = pri\nnext");
    }

    #[test]
    fn test_update_text() {
        let mut doc = Document::new("old".to_string());
        doc.update_text("brand new".to_string());
        assert_eq!(doc.text(), "brand new");
        assert_eq!(doc.text_before(0, 5), "brand");
    }
}
