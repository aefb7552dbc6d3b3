//! Token definition and keyword tables.

use crate::location::Location;

/// Lexical token kind.
///
/// Operator families that behave identically in the grammar share one kind
/// (`ComparisonOperator`, `BinaryOperator`, `ArithmeticAssignment`); the
/// token's `literal` distinguishes the concrete operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Whitespace,
    Newline,

    // Punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Colon,
    Semicolon,
    Dot,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Power,
    Assign,
    ArithmeticAssignment,
    ComparisonOperator,
    BinaryOperator,
    Increment,
    Decrement,
    Bang,
    Caret,
    Pipe,
    Ampersand,
    Channel,
    Then,
    VariadicMarker,

    // Literals
    String,
    MultilineString,
    Rune,
    Number,
    Bool,
    Cardinal,

    Ident,

    // Keywords
    As,
    Base,
    Break,
    Const,
    Continue,
    Corout,
    Else,
    For,
    Fun,
    Gen,
    Giveup,
    Hidden,
    If,
    Implements,
    Instanceof,
    Match,
    Map,
    Mimics,
    Move,
    Of,
    Or,
    Package,
    Return,
    This,
    Trait,
    Type,
    Use,
    Var,
    Yield,

    LineComment,
    BlockComment,

    Eof,
}

impl TokenKind {
    /// Tokens the parser elides between significant tokens.
    pub fn is_skippable(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace
                | TokenKind::Newline
                | TokenKind::LineComment
                | TokenKind::BlockComment
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Human-readable name used in `u_tok_s` messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Newline => "newline",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Dot => "'.'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Power => "'**'",
            TokenKind::Assign => "'='",
            TokenKind::ArithmeticAssignment => "arithmetic assignment",
            TokenKind::ComparisonOperator => "comparison operator",
            TokenKind::BinaryOperator => "binary operator",
            TokenKind::Increment => "'++'",
            TokenKind::Decrement => "'--'",
            TokenKind::Bang => "'!'",
            TokenKind::Caret => "'^'",
            TokenKind::Pipe => "'|'",
            TokenKind::Ampersand => "'&'",
            TokenKind::Channel => "'<-'",
            TokenKind::Then => "'->'",
            TokenKind::VariadicMarker => "'...'",
            TokenKind::String => "string literal",
            TokenKind::MultilineString => "string literal",
            TokenKind::Rune => "rune literal",
            TokenKind::Number => "number literal",
            TokenKind::Bool => "bool literal",
            TokenKind::Cardinal => "type name",
            TokenKind::Ident => "identifier",
            TokenKind::As => "'as'",
            TokenKind::Base => "'base'",
            TokenKind::Break => "'break'",
            TokenKind::Const => "'const'",
            TokenKind::Continue => "'continue'",
            TokenKind::Corout => "'corout'",
            TokenKind::Else => "'else'",
            TokenKind::For => "'for'",
            TokenKind::Fun => "'fun'",
            TokenKind::Gen => "'gen'",
            TokenKind::Giveup => "'giveup'",
            TokenKind::Hidden => "'hidden'",
            TokenKind::If => "'if'",
            TokenKind::Implements => "'implements'",
            TokenKind::Instanceof => "'instanceof'",
            TokenKind::Match => "'match'",
            TokenKind::Map => "'map'",
            TokenKind::Mimics => "'mimics'",
            TokenKind::Move => "'move'",
            TokenKind::Of => "'of'",
            TokenKind::Or => "'or'",
            TokenKind::Package => "'package'",
            TokenKind::Return => "'return'",
            TokenKind::This => "'this'",
            TokenKind::Trait => "'trait'",
            TokenKind::Type => "'type'",
            TokenKind::Use => "'use'",
            TokenKind::Var => "'var'",
            TokenKind::Yield => "'yield'",
            TokenKind::LineComment => "comment",
            TokenKind::BlockComment => "comment",
            TokenKind::Eof => "end of file",
        }
    }
}

/// Reserved words. `warn` and `defer` are deliberately absent: they are
/// soft keywords the parser recognizes contextually.
static KEYWORDS: phf::Map<&'static str, TokenKind> = phf::phf_map! {
    "as" => TokenKind::As,
    "base" => TokenKind::Base,
    "break" => TokenKind::Break,
    "const" => TokenKind::Const,
    "continue" => TokenKind::Continue,
    "corout" => TokenKind::Corout,
    "else" => TokenKind::Else,
    "for" => TokenKind::For,
    "fun" => TokenKind::Fun,
    "gen" => TokenKind::Gen,
    "giveup" => TokenKind::Giveup,
    "hidden" => TokenKind::Hidden,
    "if" => TokenKind::If,
    "implements" => TokenKind::Implements,
    "instanceof" => TokenKind::Instanceof,
    "match" => TokenKind::Match,
    "map" => TokenKind::Map,
    "mimics" => TokenKind::Mimics,
    "move" => TokenKind::Move,
    "of" => TokenKind::Of,
    "or" => TokenKind::Or,
    "package" => TokenKind::Package,
    "return" => TokenKind::Return,
    "this" => TokenKind::This,
    "trait" => TokenKind::Trait,
    "type" => TokenKind::Type,
    "use" => TokenKind::Use,
    "var" => TokenKind::Var,
    "yield" => TokenKind::Yield,
};

/// Reserved cardinal type names.
static CARDINALS: phf::Set<&'static str> = phf::phf_set! {
    "string", "bool", "rune",
    "int", "int8", "int16", "int32", "int64",
    "uint", "uint8", "uint16", "uint32", "uint64",
    "float32", "float64",
};

/// Classify a scanned word: keyword, bool literal, cardinal type name, or
/// plain identifier, in that order.
pub fn classify_word(word: &str) -> TokenKind {
    if let Some(&kind) = KEYWORDS.get(word) {
        return kind;
    }
    if word == "true" || word == "false" {
        return TokenKind::Bool;
    }
    if CARDINALS.contains(word) {
        return TokenKind::Cardinal;
    }
    TokenKind::Ident
}

/// A positioned token.
///
/// `literal` is the processed text (escapes applied, quotes stripped);
/// `raw` is the exact source slice, so concatenating `raw` over a token
/// stream reproduces the input byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub raw: String,
    pub location: Location,
    /// Number of line breaks inside the token's raw text.
    pub newlines: u32,
}

impl Token {
    pub fn new(kind: TokenKind, literal: String, raw: String, location: Location) -> Self {
        Token {
            kind,
            literal,
            raw,
            location,
            newlines: 0,
        }
    }

    pub fn with_newlines(mut self, newlines: u32) -> Self {
        self.newlines = newlines;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_keywords_before_cardinals() {
        assert_eq!(classify_word("map"), TokenKind::Map);
        assert_eq!(classify_word("uint32"), TokenKind::Cardinal);
        assert_eq!(classify_word("true"), TokenKind::Bool);
        assert_eq!(classify_word("warn"), TokenKind::Ident);
        assert_eq!(classify_word("total"), TokenKind::Ident);
    }
}
