//! The fixed reserved-word table.

/// A reserved word recognized by the lexer. Only words the parser actually
/// branches on are distinguished; anything else reserved-but-unused
/// (`debugger`, `enum`, …) is still lexed as `Keyword` so it can't
/// accidentally match as a free-reference identifier, but carries no
/// dedicated variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Import,
    Export,
    From,
    As,
    Default,
    Var,
    Let,
    Const,
    Function,
    Class,
    Extends,
    Super,
    Return,
    If,
    Else,
    For,
    While,
    Do,
    Switch,
    Case,
    Break,
    Continue,
    Try,
    Catch,
    Finally,
    Throw,
    New,
    Delete,
    Typeof,
    Void,
    In,
    Instanceof,
    This,
    Null,
    True,
    False,
    Async,
    Await,
    Yield,
    Static,
    Get,
    Set,
    Of,
    Other,
}

impl Keyword {
    /// Maps raw identifier text to a keyword, if it is one.
    #[must_use]
    pub fn lookup(text: &str) -> Option<Self> {
        Some(match text {
            "import" => Self::Import,
            "export" => Self::Export,
            "from" => Self::From,
            "as" => Self::As,
            "default" => Self::Default,
            "var" => Self::Var,
            "let" => Self::Let,
            "const" => Self::Const,
            "function" => Self::Function,
            "class" => Self::Class,
            "extends" => Self::Extends,
            "super" => Self::Super,
            "return" => Self::Return,
            "if" => Self::If,
            "else" => Self::Else,
            "for" => Self::For,
            "while" => Self::While,
            "do" => Self::Do,
            "switch" => Self::Switch,
            "case" => Self::Case,
            "break" => Self::Break,
            "continue" => Self::Continue,
            "try" => Self::Try,
            "catch" => Self::Catch,
            "finally" => Self::Finally,
            "throw" => Self::Throw,
            "new" => Self::New,
            "delete" => Self::Delete,
            "typeof" => Self::Typeof,
            "void" => Self::Void,
            "in" => Self::In,
            "instanceof" => Self::Instanceof,
            "this" => Self::This,
            "null" => Self::Null,
            "true" => Self::True,
            "false" => Self::False,
            "async" => Self::Async,
            "await" => Self::Await,
            "yield" => Self::Yield,
            "static" => Self::Static,
            "get" => Self::Get,
            "set" => Self::Set,
            "of" => Self::Of,
            "debugger" | "enum" | "implements" | "interface" | "package" | "private"
            | "protected" | "public" | "with" => Self::Other,
            _ => return None,
        })
    }
}
