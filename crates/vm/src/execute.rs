//! Execution loop and opcode dispatch.

use crate::error::RuntimeError;
use crate::machine::{Machine, STACK_CAPACITY};
use minic_common::{Opcode, Operand, Value};

impl<'a> Machine<'a> {
    /// Execute the program from instruction 0 until END, a return from
    /// the outermost frame, or a fatal error.
    pub fn execute(&mut self) -> Result<(), RuntimeError> {
        self.link()?;
        self.pc = 0;

        loop {
            let instr = self.fetch()?.clone();
            let at = self.pc;
            self.pc += 1;

            if self.trace {
                self.trace_instruction(at, &instr);
            }

            match instr.opcode {
                Opcode::End => return Ok(()),
                // Labels only exist to be found by the link pass.
                Opcode::Label => {}

                Opcode::Push => self.exec_push(&instr.operand)?,
                Opcode::Pop => {
                    self.pop()?;
                }
                Opcode::Dup => {
                    let top = self.peek()?;
                    self.push(top)?;
                }

                Opcode::Load => self.exec_load(&instr.operand)?,
                Opcode::Save => self.exec_save()?,
                Opcode::Store => self.exec_store()?,

                Opcode::Add => self.exec_binary(|a, b| a.wrapping_add(b), |a, b| a + b)?,
                Opcode::Sub => self.exec_binary(|a, b| a.wrapping_sub(b), |a, b| a - b)?,
                Opcode::Mul => self.exec_binary(|a, b| a.wrapping_mul(b), |a, b| a * b)?,
                Opcode::Div => self.exec_div()?,
                Opcode::Rem => self.exec_rem()?,

                Opcode::Eq => self.exec_compare(i64::eq, f64::eq)?,
                Opcode::Ne => self.exec_compare(i64::ne, f64::ne)?,
                Opcode::Lt => self.exec_compare(i64::lt, f64::lt)?,
                Opcode::Gt => self.exec_compare(i64::gt, f64::gt)?,
                Opcode::Le => self.exec_compare(i64::le, f64::le)?,
                Opcode::Ge => self.exec_compare(i64::ge, f64::ge)?,

                Opcode::Brt => self.exec_branch(&instr.operand, true)?,
                Opcode::Brz => self.exec_branch(&instr.operand, false)?,
                Opcode::Jump => {
                    let target = self.branch_target(&instr.operand)?;
                    self.pc = target;
                }

                Opcode::Call => self.exec_call(&instr.operand)?,
                Opcode::Ret => {
                    // A return from the outermost frame ends the program;
                    // there is no caller frame to restore.
                    if self.frame_base == 0 {
                        return Ok(());
                    }
                    self.exec_ret()?;
                }
                Opcode::Retv => {
                    let value = self.pop()?;
                    if self.frame_base == 0 {
                        return Ok(());
                    }
                    self.exec_ret()?;
                    self.push(value)?;
                }

                Opcode::Print => self.exec_print(&instr.operand)?,
                Opcode::Read => {
                    let token = self.read_token()?;
                    let value: i64 = token.parse().map_err(|_| RuntimeError::ReadFailed {
                        at,
                        token,
                    })?;
                    self.push(Value::Int(value))?;
                }
                Opcode::Readf => {
                    let token = self.read_token()?;
                    let value: f64 = token.parse().map_err(|_| RuntimeError::ReadFailed {
                        at,
                        token,
                    })?;
                    self.push(Value::Float(value))?;
                }

                Opcode::Int => {
                    if self.peek()?.is_float() {
                        let v = self.pop()?;
                        self.push(v.to_int())?;
                    }
                }
                Opcode::Float => {
                    if !self.peek()?.is_float() {
                        let v = self.pop()?;
                        self.push(v.to_float())?;
                    }
                }
            }
        }
    }

    fn exec_push(&mut self, operand: &Operand) -> Result<(), RuntimeError> {
        match operand {
            Operand::Int(n) => self.push(Value::Int(*n)),
            Operand::Float(f) => self.push(Value::Float(*f)),
            // Bare PUSH re-pushes the accumulator.
            Operand::None => {
                let acc = self.acc;
                self.push(acc)
            }
            _ => Err(RuntimeError::MalformedOperand { at: self.pc - 1 }),
        }
    }

    fn exec_load(&mut self, operand: &Operand) -> Result<(), RuntimeError> {
        let offset = match operand {
            Operand::Int(n) => *n,
            Operand::None => self.pop()?.as_index(),
            _ => return Err(RuntimeError::MalformedOperand { at: self.pc - 1 }),
        };
        let address = self.frame_addr(offset)?;
        let value = self.cells[address];
        self.acc = value;
        self.push(value)
    }

    fn exec_save(&mut self) -> Result<(), RuntimeError> {
        let offset = self.pop()?.as_index();
        let address = self.frame_addr(offset)?;
        let value = self.peek()?;
        self.write_cell(address, value);
        Ok(())
    }

    fn exec_store(&mut self) -> Result<(), RuntimeError> {
        let offset = self.pop()?.as_index();
        let address = self.frame_addr(offset)?;
        let value = self.pop()?;
        self.write_cell(address, value);
        Ok(())
    }

    /// Pop two cells, promote, apply, push one tagged result.
    fn exec_binary(
        &mut self,
        int_op: fn(i64, i64) -> i64,
        float_op: fn(f64, f64) -> f64,
    ) -> Result<(), RuntimeError> {
        let b = self.pop()?;
        let a = self.pop()?;
        self.push(Value::binary(a, b, int_op, float_op))
    }

    fn exec_div(&mut self) -> Result<(), RuntimeError> {
        let b = self.pop()?;
        let a = self.pop()?;
        let result = match Value::promote(a, b) {
            minic_common::NumericPair::Ints(_, 0) => {
                return Err(RuntimeError::DivisionByZero { at: self.pc - 1 });
            }
            minic_common::NumericPair::Ints(x, y) => Value::Int(x.wrapping_div(y)),
            minic_common::NumericPair::Floats(_, y) if y == 0.0 => {
                return Err(RuntimeError::DivisionByZero { at: self.pc - 1 });
            }
            minic_common::NumericPair::Floats(x, y) => Value::Float(x / y),
        };
        self.push(result)
    }

    /// REM is integer-only: both operands truncate to int first.
    fn exec_rem(&mut self) -> Result<(), RuntimeError> {
        let b = self.pop()?.as_index();
        let a = self.pop()?.as_index();
        if b == 0 {
            return Err(RuntimeError::DivisionByZero { at: self.pc - 1 });
        }
        self.push(Value::Int(a.wrapping_rem(b)))
    }

    fn exec_compare(
        &mut self,
        int_cmp: fn(&i64, &i64) -> bool,
        float_cmp: fn(&f64, &f64) -> bool,
    ) -> Result<(), RuntimeError> {
        let b = self.pop()?;
        let a = self.pop()?;
        self.push(Value::compare(a, b, int_cmp, float_cmp))
    }

    /// Resolve the target of a branch/jump from its operand form:
    /// label operand, numeric operand, or popped destination cell.
    fn branch_target(&mut self, operand: &Operand) -> Result<usize, RuntimeError> {
        match operand {
            Operand::Label(name) => self.resolve(name),
            Operand::Int(n) => self.target_index(*n),
            Operand::None => {
                let destination = self.pop()?.as_index();
                self.target_index(destination)
            }
            _ => Err(RuntimeError::MalformedOperand { at: self.pc - 1 }),
        }
    }

    fn exec_branch(&mut self, operand: &Operand, on_true: bool) -> Result<(), RuntimeError> {
        let condition = self.pop()?;
        // The no-operand form consumes its destination cell whether or
        // not the branch is taken.
        let popped_target = match operand {
            Operand::None => Some(self.pop()?.as_index()),
            _ => None,
        };
        if condition.is_truthy() != on_true {
            return Ok(());
        }
        let target = match popped_target {
            Some(destination) => self.target_index(destination)?,
            None => self.branch_target(operand)?,
        };
        self.pc = target;
        Ok(())
    }

    /// CALL: relocate the argument count beneath the arguments, push the
    /// caller's frame base and return address, and enter the callee.
    fn exec_call(&mut self, operand: &Operand) -> Result<(), RuntimeError> {
        let target = match operand {
            Operand::Label(name) => self.resolve(name)?,
            Operand::None => {
                let destination = self.pop()?.as_index();
                self.target_index(destination)?
            }
            _ => return Err(RuntimeError::MalformedOperand { at: self.pc - 1 }),
        };

        let arg_count = self.peek()?.as_index();
        if arg_count < 0 || arg_count as usize + 1 > self.top {
            return Err(RuntimeError::StackUnderflow { at: self.pc - 1 });
        }
        let arg_count = arg_count as usize;

        // [..., arg1..argN, n] -> [..., n, arg1..argN]
        let count_cell = self.cells[self.top - 1];
        for i in 1..=arg_count {
            self.cells[self.top - i] = self.cells[self.top - i - 1];
        }
        self.cells[self.top - arg_count - 1] = count_cell;

        self.push(Value::Int(self.frame_base as i64))?;
        self.push(Value::Int(self.pc as i64))?;

        self.frame_base = self.top - 2 - arg_count;
        self.pc = target;
        Ok(())
    }

    /// Shared teardown for RET and RETV in a non-outermost frame.
    fn exec_ret(&mut self) -> Result<(), RuntimeError> {
        let arg_count = self.cells[self.frame_base - 1].as_index();
        if arg_count < 0 {
            return Err(RuntimeError::MalformedOperand { at: self.pc - 1 });
        }

        let link = self.frame_base + arg_count as usize;
        if link + 1 >= STACK_CAPACITY {
            return Err(RuntimeError::AddressOutOfRange {
                at: self.pc - 1,
                address: link as i64 + 1,
            });
        }
        let saved_base = self.cells[link].as_index();
        let return_pc = self.cells[link + 1].as_index();
        if saved_base < 0 || saved_base >= STACK_CAPACITY as i64 {
            return Err(RuntimeError::AddressOutOfRange {
                at: self.pc - 1,
                address: saved_base,
            });
        }
        let return_pc = self.target_index(return_pc)?;

        // Drop the frame and the argument-count cell beneath it.
        self.top = self.frame_base - 1;
        self.frame_base = saved_base as usize;
        self.pc = return_pc;
        Ok(())
    }

    fn exec_print(&mut self, operand: &Operand) -> Result<(), RuntimeError> {
        let at = self.pc - 1;
        match operand {
            Operand::Str(text) => {
                writeln!(self.output, "{text}").map_err(|e| RuntimeError::Io {
                    at,
                    message: e.to_string(),
                })
            }
            // Value form prints the top of stack and leaves it there.
            Operand::None => {
                let value = self.peek()?;
                writeln!(self.output, "{value}").map_err(|e| RuntimeError::Io {
                    at,
                    message: e.to_string(),
                })
            }
            _ => Err(RuntimeError::MalformedOperand { at }),
        }
    }
}
