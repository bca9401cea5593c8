//! Expression nodes.

use crate::function::{ArrowFunction, Class, Function};
use crate::ident::Ident;
use crate::literal::{NumberLit, RegexLit, StrLit, TaggedTemplate, TemplateLit};
use crate::pattern::PropertyKey;
use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    BitNot,
    TypeOf,
    Void,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp {
    Inc,
    Dec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add, Sub, Mul, Div, Mod, Pow,
    Eq, NotEq, StrictEq, StrictNotEq,
    Lt, Gt, LtEq, GtEq,
    BitAnd, BitOr, BitXor, Shl, Shr, UShr,
    In, InstanceOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
    Coalesce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign, SubAssign, MulAssign, DivAssign, ModAssign, PowAssign,
    BitAndAssign, BitOrAssign, BitXorAssign, ShlAssign, ShrAssign, UShrAssign,
    AndAssign, OrAssign, CoalesceAssign,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLit {
    pub elements: Vec<Option<Expr>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    Init,
    Method,
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProp {
    pub key: PropertyKey,
    pub value: Expr,
    pub computed: bool,
    pub shorthand: bool,
    pub kind: PropKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectMember {
    Prop(ObjectProp),
    Spread(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLit {
    pub props: Vec<ObjectMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub argument: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpr {
    pub op: UpdateOp,
    pub argument: Box<Expr>,
    pub prefix: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpr {
    pub op: LogicalOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    pub op: AssignOp,
    pub target: Box<Expr>,
    pub value: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpr {
    pub test: Box<Expr>,
    pub consequent: Box<Expr>,
    pub alternate: Box<Expr>,
    pub span: Span,
}

/// A call expression. `callee_is_rewrite_candidate` records whether `callee`
/// is itself an `Ident`/`Member` — the only shapes the transformer's call-site
/// `this`-preservation wrap (`(0, <replacement>)`) ever applies to.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub optional: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

/// `object.property` or `object[property]`. `property` is only tagged
/// `IdentContext::MemberProperty` (and so skipped by free-reference rewriting)
/// when `computed` is `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub property: Box<Expr>,
    pub computed: bool,
    pub optional: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadElement {
    pub argument: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceExpr {
    pub expressions: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpr {
    pub inner: Box<Expr>,
    pub span: Span,
}

/// A dynamic `import(specifier)` call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicImportExpr {
    pub argument: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AwaitExpr {
    pub argument: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YieldExpr {
    pub argument: Option<Box<Expr>>,
    pub delegate: bool,
    pub span: Span,
}

/// The expression grammar. Every variant knows its own span so the
/// transformer never has to reconstruct one.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    Number(NumberLit),
    Str(StrLit),
    Bool(bool, Span),
    Null(Span),
    This(Span),
    Template(TemplateLit),
    TaggedTemplate(TaggedTemplate),
    Regex(RegexLit),
    Array(ArrayLit),
    Object(ObjectLit),
    Function(Function),
    Arrow(ArrowFunction),
    Class(Class),
    Unary(UnaryExpr),
    Update(UpdateExpr),
    Binary(BinaryExpr),
    Logical(LogicalExpr),
    Assign(AssignExpr),
    Conditional(ConditionalExpr),
    Call(CallExpr),
    New(NewExpr),
    Member(MemberExpr),
    Spread(SpreadElement),
    Sequence(SequenceExpr),
    Paren(ParenExpr),
    DynamicImport(DynamicImportExpr),
    Await(AwaitExpr),
    Yield(YieldExpr),
}

impl Expr {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Ident(i) => i.span,
            Self::Number(n) => n.span,
            Self::Str(s) => s.span,
            Self::Bool(_, s) | Self::Null(s) | Self::This(s) => *s,
            Self::Template(t) => t.span,
            Self::TaggedTemplate(t) => t.span,
            Self::Regex(r) => r.span,
            Self::Array(a) => a.span,
            Self::Object(o) => o.span,
            Self::Function(f) => f.span,
            Self::Arrow(a) => a.span,
            Self::Class(c) => c.span,
            Self::Unary(u) => u.span,
            Self::Update(u) => u.span,
            Self::Binary(b) => b.span,
            Self::Logical(l) => l.span,
            Self::Assign(a) => a.span,
            Self::Conditional(c) => c.span,
            Self::Call(c) => c.span,
            Self::New(n) => n.span,
            Self::Member(m) => m.span,
            Self::Spread(s) => s.span,
            Self::Sequence(s) => s.span,
            Self::Paren(p) => p.span,
            Self::DynamicImport(d) => d.span,
            Self::Await(a) => a.span,
            Self::Yield(y) => y.span,
        }
    }

    /// Whether this expression, used as a call callee or tagged-template tag,
    /// can ever contain a rewritten free-reference identifier at its head
    /// (and therefore needs the `(0, …)` `this`-suppressing wrap if rewritten).
    #[must_use]
    pub fn is_identifier_or_member(&self) -> bool {
        matches!(self, Self::Ident(_) | Self::Member(_))
    }
}
