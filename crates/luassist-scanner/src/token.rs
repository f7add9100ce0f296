/// The block-opening keywords of the language.
///
/// `for` and `while` are deliberately absent: their headers end in `do`,
/// and it is the `do` token that opens the block they introduce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockTag {
    Function,
    If,
    Do,
    Repeat,
}

impl BlockTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockTag::Function => "function",
            BlockTag::If => "if",
            BlockTag::Do => "do",
            BlockTag::Repeat => "repeat",
        }
    }

    /// Classify a word as a block opener, if it is one.
    pub fn from_word(word: &str) -> Option<BlockTag> {
        match word {
            "function" => Some(BlockTag::Function),
            "if" => Some(BlockTag::If),
            "do" => Some(BlockTag::Do),
            "repeat" => Some(BlockTag::Repeat),
            _ => None,
        }
    }
}

/// The kind of a scanned token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A `--` line comment or `--[[ ... ]]` block comment, delimiters included.
    Comment,
    /// A quoted or long-bracket string literal, delimiters included.
    StringLiteral,
    /// A keyword that opens a nested block.
    BlockOpen(BlockTag),
    /// `end` or `until`.
    BlockClose,
    /// Any other word (identifiers, numbers, non-structural keywords).
    Other,
}

/// One token of scanned source text.
///
/// Offsets are byte offsets into the scanned source; `line` is the 0-based
/// line the token starts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start_offset: usize,
    pub end_offset: usize,
    pub line: u32,
}
