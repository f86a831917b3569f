//! Minic code generator — lowers a validated syntax tree to the flat
//! stack-machine instruction stream.
//!
//! The scanner, parser, and symbol-table construction run upstream;
//! this crate consumes their outputs through the [`AstNode`] and
//! [`SymbolTable`] interfaces and produces a [`minic_common::Program`]
//! plus a list of [`Diagnostic`]s. Generation never aborts: problems
//! are collected and the walk continues, and any diagnostic at all
//! means the output should be discarded.
//!
//! # Usage
//!
//! ```
//! use minic_codegen::{generate, AstNode, SymbolTable};
//!
//! // int main(void) { output(7); }
//! let table = SymbolTable::new();
//! let root = AstNode::program(vec![AstNode::function(
//!     "main",
//!     vec![],
//!     AstNode::compound(vec![AstNode::output(AstNode::int_lit(7))]),
//! )]);
//!
//! let result = generate(&root, &table);
//! assert!(result.is_clean());
//! assert!(result.program.len() > 0);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod frame;
pub mod generator;
pub mod labels;
pub mod symbol;

pub use ast::{AstKind, AstNode};
pub use diagnostics::Diagnostic;
pub use frame::{FrameEntry, FrameLayout};
pub use generator::{CodeGenerator, Generated};
pub use labels::LabelAllocator;
pub use symbol::{DataType, Symbol, SymbolKind, SymbolTable};

/// Generate code for a program tree against its symbol table.
pub fn generate(root: &AstNode, symbols: &SymbolTable) -> Generated {
    CodeGenerator::new(symbols).generate(root)
}
