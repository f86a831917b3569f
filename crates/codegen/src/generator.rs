//! The tree walk that lowers the syntax tree to instructions.

use crate::ast::{AstKind, AstNode};
use crate::diagnostics::Diagnostic;
use crate::frame::{FrameEntry, FrameLayout};
use crate::labels::LabelAllocator;
use crate::symbol::SymbolTable;
use minic_common::{Instruction, Opcode, Operand, Program};

/// The result of one generation run. A non-empty diagnostic list means
/// the program is best-effort output and should be treated as a failed
/// compilation by callers.
#[derive(Debug)]
pub struct Generated {
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}

impl Generated {
    /// True when generation finished without diagnostics.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Walks the syntax tree depth-first and emits the instruction stream.
///
/// All state (the frame table, the label counter, the emitted code)
/// lives on the instance; one instance handles one program.
pub struct CodeGenerator<'st> {
    symbols: &'st SymbolTable,
    frame: FrameLayout,
    labels: LabelAllocator,
    code: Vec<Instruction>,
    diagnostics: Vec<Diagnostic>,
}

impl<'st> CodeGenerator<'st> {
    /// Create a generator reading the given symbol table.
    pub fn new(symbols: &'st SymbolTable) -> Self {
        Self {
            symbols,
            frame: FrameLayout::new(),
            labels: LabelAllocator::new(),
            code: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Generate code for a whole program tree.
    pub fn generate(mut self, root: &AstNode) -> Generated {
        self.reset();
        if root.kind == AstKind::Program {
            self.gen_program(root);
        } else {
            self.unexpected(root);
        }
        Generated {
            program: Program::new(self.code),
            diagnostics: self.diagnostics,
        }
    }

    fn reset(&mut self) {
        self.frame.reset();
        self.labels.reset();
        self.code.clear();
        self.diagnostics.clear();
    }

    fn emit(&mut self, instruction: Instruction) {
        self.code.push(instruction);
    }

    fn diagnose(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn unexpected(&mut self, node: &AstNode) {
        self.diagnose(Diagnostic::UnexpectedNode {
            kind: format!("{:?}", node.kind),
        });
    }

    // ---- Declarations ----

    fn gen_program(&mut self, node: &AstNode) {
        // Execution starts at main regardless of declaration order.
        self.emit(Instruction::with_label(Opcode::Jump, "main"));
        for declaration in &node.children {
            match declaration.kind {
                AstKind::VarDeclaration => self.gen_var_declaration(declaration),
                AstKind::FunDeclaration => self.gen_fun_declaration(declaration),
                _ => self.unexpected(declaration),
            }
        }
        self.emit(Instruction::nullary(Opcode::End));
    }

    fn gen_fun_declaration(&mut self, node: &AstNode) {
        self.frame.reset();
        self.emit(Instruction::label_def(&node.text));

        if let Some(params) = node.children.iter().find(|c| c.kind == AstKind::ParamList) {
            self.declare_params(params);
        }
        // The two slots between the parameters and the locals belong to
        // the saved frame base and return address that CALL pushes.
        self.frame.reserve_linkage();

        match node.children.iter().find(|c| c.kind == AstKind::CompoundStmt) {
            Some(body) => self.gen_compound(body),
            None => self.unexpected(node),
        }

        // Fall-through bodies still tear their frame down.
        if !self.code.last().is_some_and(Instruction::is_return) {
            self.emit(Instruction::nullary(Opcode::Ret));
        }
        self.frame.reset();
    }

    fn declare_params(&mut self, node: &AstNode) {
        for param in &node.children {
            if param.kind != AstKind::Param {
                self.unexpected(param);
                continue;
            }
            let is_float = match self.symbols.find_symbol(&param.text) {
                Some(symbol) => {
                    if symbol.array_size.is_some() {
                        self.diagnose(Diagnostic::ArrayParameter {
                            name: param.text.clone(),
                        });
                    }
                    symbol.data_type.is_float()
                }
                None => {
                    self.diagnose(Diagnostic::UnknownSymbol {
                        name: param.text.clone(),
                    });
                    false
                }
            };
            self.frame.declare(&param.text, false, 1, is_float);
        }
    }

    fn gen_var_declaration(&mut self, node: &AstNode) {
        let Some(symbol) = self.symbols.find_symbol(&node.text) else {
            self.diagnose(Diagnostic::UnknownSymbol {
                name: node.text.clone(),
            });
            return;
        };
        let is_float = symbol.data_type.is_float();
        let (is_array, element_count) = match symbol.array_size {
            Some(size) => (true, size),
            None => (false, 1),
        };

        let offset = self.frame.declare(&node.text, is_array, element_count, is_float);

        // Every declared slot is zeroed before first use; that is what
        // gives repeated calls fresh locals in reused storage.
        for slot in 0..element_count {
            self.emit(Instruction::with_int(Opcode::Push, 0));
            if is_float {
                self.emit(Instruction::nullary(Opcode::Float));
            }
            self.emit(Instruction::with_int(Opcode::Push, (offset + slot) as i64));
            self.emit(Instruction::nullary(Opcode::Store));
        }
    }

    // ---- Statements ----

    fn gen_compound(&mut self, node: &AstNode) {
        for item in &node.children {
            match item.kind {
                AstKind::VarDeclaration => self.gen_var_declaration(item),
                _ => self.gen_statement(item),
            }
        }
    }

    fn gen_statement(&mut self, node: &AstNode) {
        match node.kind {
            AstKind::ExpressionStmt => {
                if let Some(expr) = node.children.first() {
                    self.gen_expression(expr);
                }
            }
            AstKind::CompoundStmt => self.gen_compound(node),
            AstKind::IfStmt => self.gen_if(node),
            AstKind::WhileStmt => self.gen_while(node),
            AstKind::ReturnStmt => self.gen_return(node),
            AstKind::OutputStmt => self.gen_output(node),
            _ => self.unexpected(node),
        }
    }

    fn gen_if(&mut self, node: &AstNode) {
        let [condition, then_branch, rest @ ..] = node.children.as_slice() else {
            self.unexpected(node);
            return;
        };
        let else_label = self.labels.fresh();
        let end_label = self.labels.fresh();

        self.gen_expression(condition);
        self.emit(Instruction::with_label(Opcode::Brz, &else_label));
        self.gen_statement(then_branch);
        self.emit(Instruction::with_label(Opcode::Jump, &end_label));
        self.emit(Instruction::label_def(&else_label));
        if let Some(else_branch) = rest.first() {
            self.gen_statement(else_branch);
        }
        self.emit(Instruction::label_def(&end_label));
    }

    fn gen_while(&mut self, node: &AstNode) {
        let [condition, body] = node.children.as_slice() else {
            self.unexpected(node);
            return;
        };
        let start_label = self.labels.fresh();
        let end_label = self.labels.fresh();

        self.emit(Instruction::label_def(&start_label));
        self.gen_expression(condition);
        self.emit(Instruction::with_label(Opcode::Brz, &end_label));
        self.gen_statement(body);
        self.emit(Instruction::with_label(Opcode::Jump, &start_label));
        self.emit(Instruction::label_def(&end_label));
    }

    fn gen_return(&mut self, node: &AstNode) {
        match node.children.first() {
            Some(expr) => {
                // The returned value keeps the expression's own type;
                // it is not coerced to the caller's expected type.
                self.gen_expression(expr);
                self.emit(Instruction::nullary(Opcode::Retv));
            }
            None => self.emit(Instruction::nullary(Opcode::Ret)),
        }
    }

    fn gen_output(&mut self, node: &AstNode) {
        let Some(value) = node.children.first() else {
            self.unexpected(node);
            return;
        };
        if value.kind == AstKind::StrLit {
            self.emit(Instruction::new(Opcode::Print, Operand::string(&value.text)));
        } else {
            self.gen_expression(value);
            self.emit(Instruction::nullary(Opcode::Print));
        }
    }

    // ---- Expressions ----

    fn gen_expression(&mut self, node: &AstNode) {
        match node.kind {
            AstKind::Assign => self.gen_assign(node),
            AstKind::BinaryOp => self.gen_binary(node),
            AstKind::Var => self.gen_var_load(node),
            AstKind::Call => self.gen_call(node),
            AstKind::InputExpr => self.gen_input(node),
            AstKind::IntLit => self.emit(Instruction::with_int(Opcode::Push, node.int_value)),
            AstKind::FloatLit => match node.text.parse::<f64>() {
                Ok(value) => self.emit(Instruction::new(Opcode::Push, Operand::Float(value))),
                Err(_) => self.diagnose(Diagnostic::InvalidFloatLiteral {
                    text: node.text.clone(),
                }),
            },
            _ => self.unexpected(node),
        }
    }

    fn gen_binary(&mut self, node: &AstNode) {
        let [lhs, rhs] = node.children.as_slice() else {
            self.unexpected(node);
            return;
        };
        let Some(opcode) = binary_opcode(&node.text) else {
            self.diagnose(Diagnostic::UnknownOperator {
                text: node.text.clone(),
            });
            return;
        };
        self.gen_expression(lhs);
        self.gen_expression(rhs);
        self.emit(Instruction::nullary(opcode));
    }

    fn gen_call(&mut self, node: &AstNode) {
        // Arguments go on the stack left to right, then the count; the
        // callee consumes exactly that many cells.
        for argument in &node.children {
            self.gen_expression(argument);
        }
        self.emit(Instruction::with_int(Opcode::Push, node.children.len() as i64));
        self.emit(Instruction::with_label(Opcode::Call, &node.text));
    }

    fn gen_input(&mut self, node: &AstNode) {
        if !node.text.is_empty() {
            self.emit(Instruction::new(Opcode::Print, Operand::string(&node.text)));
        }
        let reads_float = node
            .children
            .first()
            .filter(|c| c.kind == AstKind::Var)
            .and_then(|c| self.symbols.find_symbol(&c.text))
            .is_some_and(|s| s.data_type.is_float());
        if reads_float {
            self.emit(Instruction::nullary(Opcode::Readf));
        } else {
            self.emit(Instruction::nullary(Opcode::Read));
        }
    }

    /// Load a variable reference onto the stack.
    fn gen_var_load(&mut self, node: &AstNode) {
        let Some(entry) = self.frame.entry(&node.text) else {
            self.diagnose(Diagnostic::UnknownVariable {
                name: node.text.clone(),
            });
            return;
        };
        match node.children.first() {
            Some(index) => {
                if !entry.is_array {
                    self.diagnose(Diagnostic::NotAnArray {
                        name: node.text.clone(),
                    });
                    return;
                }
                self.gen_indexed_address(index, entry);
                self.emit(Instruction::nullary(Opcode::Load));
            }
            None => {
                if entry.is_array {
                    self.diagnose(Diagnostic::ArrayWithoutIndex {
                        name: node.text.clone(),
                    });
                }
                self.emit(Instruction::with_int(Opcode::Load, entry.offset as i64));
            }
        }
    }

    /// Emit the dynamic-address computation for an indexed access:
    /// index expression, truncated to int, plus the array base.
    fn gen_indexed_address(&mut self, index: &AstNode, entry: FrameEntry) {
        self.gen_expression(index);
        self.emit(Instruction::nullary(Opcode::Int));
        self.emit(Instruction::with_int(Opcode::Push, entry.offset as i64));
        self.emit(Instruction::nullary(Opcode::Add));
    }

    fn gen_assign(&mut self, node: &AstNode) {
        let [target, value] = node.children.as_slice() else {
            self.unexpected(node);
            return;
        };
        if target.kind != AstKind::Var {
            self.unexpected(target);
            return;
        }
        match value.kind {
            AstKind::ArrayInit => self.gen_array_init(target, value),
            AstKind::ArrayOpExpr => self.gen_array_op(target, value),
            _ => self.gen_scalar_assign(target, value),
        }
    }

    fn gen_scalar_assign(&mut self, target: &AstNode, value: &AstNode) {
        self.gen_expression(value);

        let Some(entry) = self.frame.entry(&target.text) else {
            self.diagnose(Diagnostic::UnknownVariable {
                name: target.text.clone(),
            });
            return;
        };
        // The single coercion point: the computed value is forced to the
        // target's declared type, truncating or widening as needed.
        self.emit_coercion(entry.is_float);

        match target.children.first() {
            Some(index) => {
                if !entry.is_array {
                    self.diagnose(Diagnostic::NotAnArray {
                        name: target.text.clone(),
                    });
                    return;
                }
                // No bounds check: an out-of-range index addresses
                // whatever frame slot the arithmetic lands on.
                self.gen_indexed_address(index, entry);
                self.emit(Instruction::nullary(Opcode::Store));
            }
            None => {
                if entry.is_array {
                    self.diagnose(Diagnostic::ArrayWithoutIndex {
                        name: target.text.clone(),
                    });
                }
                self.emit(Instruction::with_int(Opcode::Push, entry.offset as i64));
                self.emit(Instruction::nullary(Opcode::Store));
            }
        }
    }

    fn gen_array_init(&mut self, target: &AstNode, node: &AstNode) {
        let Some(entry) = self.frame.entry(&target.text) else {
            self.diagnose(Diagnostic::UnknownVariable {
                name: target.text.clone(),
            });
            return;
        };
        if !entry.is_array {
            self.diagnose(Diagnostic::NotAnArray {
                name: target.text.clone(),
            });
            return;
        }

        let given = node.children.len();
        let filled = entry.element_count.min(given);

        for (slot, element) in node.children.iter().take(filled).enumerate() {
            self.gen_expression(element);
            self.emit_coercion(entry.is_float);
            self.emit(Instruction::with_int(Opcode::Push, (entry.offset + slot) as i64));
            self.emit(Instruction::nullary(Opcode::Store));
        }
        // Zero-fill whatever the initializer list left uncovered.
        for slot in filled..entry.element_count {
            self.emit(Instruction::with_int(Opcode::Push, 0));
            if entry.is_float {
                self.emit(Instruction::nullary(Opcode::Float));
            }
            self.emit(Instruction::with_int(Opcode::Push, (entry.offset + slot) as i64));
            self.emit(Instruction::nullary(Opcode::Store));
        }

        if given > entry.element_count {
            self.diagnose(Diagnostic::TooManyInitializers {
                name: target.text.clone(),
                expected: entry.element_count,
                given,
            });
        }
    }

    /// Element-wise `target = source <op> scalar`. The scalar is
    /// evaluated once into a scratch slot, then combined with each
    /// source element in turn.
    fn gen_array_op(&mut self, target: &AstNode, node: &AstNode) {
        let [source, scalar] = node.children.as_slice() else {
            self.unexpected(node);
            return;
        };
        let Some(opcode) = binary_opcode(&node.text) else {
            self.diagnose(Diagnostic::UnknownOperator {
                text: node.text.clone(),
            });
            return;
        };
        let Some(destination) = self.array_entry(&target.text) else {
            return;
        };
        let Some(origin) = self.array_entry(&source.text) else {
            return;
        };

        self.gen_expression(scalar);
        let temp = self.frame.push_temp();
        self.emit(Instruction::with_int(Opcode::Push, temp as i64));
        self.emit(Instruction::nullary(Opcode::Store));

        if destination.element_count != origin.element_count {
            self.diagnose(Diagnostic::ArraySizeMismatch {
                target: target.text.clone(),
                src: source.text.clone(),
            });
        }
        let count = destination.element_count.min(origin.element_count);

        for slot in 0..count {
            self.emit(Instruction::with_int(Opcode::Load, (origin.offset + slot) as i64));
            self.emit(Instruction::with_int(Opcode::Load, temp as i64));
            self.emit(Instruction::nullary(opcode));
            self.emit_coercion(destination.is_float);
            self.emit(Instruction::with_int(
                Opcode::Push,
                (destination.offset + slot) as i64,
            ));
            self.emit(Instruction::nullary(Opcode::Store));
        }

        self.frame.pop_temp();
    }

    /// Frame lookup that also requires the name to be an array.
    fn array_entry(&mut self, name: &str) -> Option<FrameEntry> {
        match self.frame.entry(name) {
            Some(entry) if entry.is_array => Some(entry),
            Some(_) => {
                self.diagnose(Diagnostic::NotAnArray {
                    name: name.to_string(),
                });
                None
            }
            None => {
                self.diagnose(Diagnostic::UnknownVariable {
                    name: name.to_string(),
                });
                None
            }
        }
    }

    fn emit_coercion(&mut self, to_float: bool) {
        if to_float {
            self.emit(Instruction::nullary(Opcode::Float));
        } else {
            self.emit(Instruction::nullary(Opcode::Int));
        }
    }
}

fn binary_opcode(text: &str) -> Option<Opcode> {
    match text {
        "+" => Some(Opcode::Add),
        "-" => Some(Opcode::Sub),
        "*" => Some(Opcode::Mul),
        "/" => Some(Opcode::Div),
        "%" => Some(Opcode::Rem),
        "==" => Some(Opcode::Eq),
        "!=" => Some(Opcode::Ne),
        "<" => Some(Opcode::Lt),
        ">" => Some(Opcode::Gt),
        "<=" => Some(Opcode::Le),
        ">=" => Some(Opcode::Ge),
        _ => None,
    }
}
