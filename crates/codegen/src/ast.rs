//! The upstream syntax-tree interface.
//!
//! The parser hands the generator an untyped tree: every node carries a
//! kind, an optional lexeme, an optional integer payload, and its
//! children. Validation (undeclared names, arity, most type errors)
//! happened upstream; the generator only reports what it cannot lower.

/// Grammar category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstKind {
    /// Root. Children are variable and function declarations.
    Program,
    /// `text` is the variable name; type and size come from the symbol table.
    VarDeclaration,
    /// `text` is the function name; children are a ParamList and a CompoundStmt.
    FunDeclaration,
    /// Children are Param nodes, left to right.
    ParamList,
    /// `text` is the parameter name.
    Param,
    /// Children are local VarDeclarations and statements, in order.
    CompoundStmt,
    /// Child, when present, is an expression evaluated for effect.
    ExpressionStmt,
    /// Children: condition, then-statement, optional else-statement.
    IfStmt,
    /// Children: condition, body.
    WhileStmt,
    /// Child, when present, is the returned expression.
    ReturnStmt,
    /// Child is an expression or a StrLit.
    OutputStmt,
    /// `text` is the prompt ("" for none); the optional Var child names
    /// the destination and selects READ vs READF.
    InputExpr,
    /// Children: Var target, then the assigned expression (or an
    /// ArrayInit / ArrayOpExpr).
    Assign,
    /// `text` is the operator lexeme; children are lhs and rhs.
    BinaryOp,
    /// `text` is the name; the optional child is an index expression.
    Var,
    /// `text` is the callee name; children are the arguments.
    Call,
    /// Children are the element expressions of `{ ... }`.
    ArrayInit,
    /// `text` is the operator; children: Var source array, scalar expression.
    ArrayOpExpr,
    /// `int_value` holds the literal.
    IntLit,
    /// `text` holds the literal spelling.
    FloatLit,
    /// `text` holds the (unquoted) string.
    StrLit,
}

/// One node of the syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub kind: AstKind,
    pub text: String,
    pub int_value: i64,
    pub children: Vec<AstNode>,
}

impl AstNode {
    /// A node with no lexeme and no children.
    pub fn new(kind: AstKind) -> Self {
        Self {
            kind,
            text: String::new(),
            int_value: 0,
            children: Vec::new(),
        }
    }

    /// A node carrying a lexeme.
    pub fn with_text(kind: AstKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::new(kind)
        }
    }

    /// A node with children.
    pub fn with_children(kind: AstKind, children: Vec<AstNode>) -> Self {
        Self {
            children,
            ..Self::new(kind)
        }
    }

    /// Append a child, fluently.
    pub fn child(mut self, node: AstNode) -> Self {
        self.children.push(node);
        self
    }

    // Shorthand constructors for the common shapes. The parser builds
    // trees out of these; so do the tests.

    pub fn int_lit(value: i64) -> Self {
        Self {
            int_value: value,
            ..Self::new(AstKind::IntLit)
        }
    }

    pub fn float_lit(text: impl Into<String>) -> Self {
        Self::with_text(AstKind::FloatLit, text)
    }

    pub fn str_lit(text: impl Into<String>) -> Self {
        Self::with_text(AstKind::StrLit, text)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::with_text(AstKind::Var, name)
    }

    pub fn var_indexed(name: impl Into<String>, index: AstNode) -> Self {
        Self::with_text(AstKind::Var, name).child(index)
    }

    pub fn binary(op: impl Into<String>, lhs: AstNode, rhs: AstNode) -> Self {
        Self::with_text(AstKind::BinaryOp, op).child(lhs).child(rhs)
    }

    pub fn assign(target: AstNode, value: AstNode) -> Self {
        Self::with_children(AstKind::Assign, vec![target, value])
    }

    pub fn call(name: impl Into<String>, args: Vec<AstNode>) -> Self {
        Self {
            children: args,
            ..Self::with_text(AstKind::Call, name)
        }
    }

    pub fn expr_stmt(expr: AstNode) -> Self {
        Self::with_children(AstKind::ExpressionStmt, vec![expr])
    }

    pub fn output(value: AstNode) -> Self {
        Self::with_children(AstKind::OutputStmt, vec![value])
    }

    pub fn var_decl(name: impl Into<String>) -> Self {
        Self::with_text(AstKind::VarDeclaration, name)
    }

    pub fn param(name: impl Into<String>) -> Self {
        Self::with_text(AstKind::Param, name)
    }

    pub fn compound(items: Vec<AstNode>) -> Self {
        Self::with_children(AstKind::CompoundStmt, items)
    }

    pub fn function(name: impl Into<String>, params: Vec<AstNode>, body: AstNode) -> Self {
        Self::with_text(AstKind::FunDeclaration, name)
            .child(Self::with_children(AstKind::ParamList, params))
            .child(body)
    }

    pub fn program(declarations: Vec<AstNode>) -> Self {
        Self::with_children(AstKind::Program, declarations)
    }
}
