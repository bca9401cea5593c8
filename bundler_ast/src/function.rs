//! Function, arrow function, and class nodes.

use crate::ident::Ident;
use crate::pattern::Pattern;
use crate::span::Span;
use crate::statement::{Block, Stmt};
use crate::expression::Expr;
use crate::pattern::PropertyKey;

/// A function declaration or function expression. The two are distinguished
/// by where the node sits in the tree, not by a field here.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Absent for an anonymous function expression.
    pub name: Option<Ident>,
    pub params: Vec<Pattern>,
    pub body: Block,
    pub is_async: bool,
    pub is_generator: bool,
    pub span: Span,
}

/// An arrow function. Arrow bodies are either a block or a single expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunction {
    pub params: Vec<Pattern>,
    pub body: ArrowBody,
    pub is_async: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    Block(Block),
    Expr(Box<Expr>),
}

/// A class declaration or class expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    /// Absent for an anonymous class expression, and for `export default class {}`.
    pub name: Option<Ident>,
    pub super_class: Option<Box<Expr>>,
    pub body: Vec<ClassMember>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Get,
    Set,
    Constructor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Method {
        key: PropertyKey,
        computed: bool,
        is_static: bool,
        kind: MethodKind,
        function: Function,
    },
    Field {
        key: PropertyKey,
        computed: bool,
        is_static: bool,
        value: Option<Expr>,
        span: Span,
    },
    StaticBlock(Block),
}

impl Function {
    /// All free-reference parameter-default and body statements, for
    /// traversal helpers; declared here rather than in the transformer crate
    /// because the shape is intrinsic to the node, not to a particular pass.
    #[must_use]
    pub fn body_statements(&self) -> &[Stmt] {
        &self.body.stmts
    }
}
