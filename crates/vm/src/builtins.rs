//! Builtin dispatch: arithmetic, comparison, stack words, print,
//! and the drawing words that forward to the host.

use crate::error::RuntimeError;
use crate::host::Host;
use crate::machine::Vm;
use nib_common::{Builtin, Value};

impl Vm {
    pub(crate) fn exec_builtin(
        &mut self,
        builtin: Builtin,
        host: &mut dyn Host,
    ) -> Result<(), RuntimeError> {
        match builtin {
            Builtin::Add => self.binary_num(|a, b| a + b),
            Builtin::Sub => self.binary_num(|a, b| a - b),
            Builtin::Mul => self.binary_num(|a, b| a * b),
            Builtin::Div => self.checked_div(|a, b| a / b),
            Builtin::Mod => self.checked_div(|a, b| a % b),

            Builtin::Lt => self.compare(|a, b| a < b),
            Builtin::Gt => self.compare(|a, b| a > b),
            Builtin::Le => self.compare(|a, b| a <= b),
            Builtin::Ge => self.compare(|a, b| a >= b),
            Builtin::Eq => self.equality(false),
            Builtin::Ne => self.equality(true),

            Builtin::Pop => {
                self.pop()?;
                Ok(())
            }
            Builtin::Dup => {
                let top = *self
                    .stack
                    .last()
                    .ok_or(RuntimeError::StackUnderflow { at: self.pc - 1 })?;
                self.push(top)
            }
            Builtin::Exch => {
                let b = self.pop()?;
                let a = self.pop()?;
                self.push(b)?;
                self.push(a)
            }
            Builtin::Index => self.exec_index(),

            Builtin::Puts => {
                let value = self.pop()?;
                host.print(&format!("{value}\n"));
                Ok(())
            }

            // Drawing words: topmost value is the last argument.
            Builtin::SetFillStyle => {
                let b = self.pop_num()?;
                let g = self.pop_num()?;
                let r = self.pop_num()?;
                host.set_fill_style(r, g, b);
                Ok(())
            }
            Builtin::SetStrokeStyle => {
                let b = self.pop_num()?;
                let g = self.pop_num()?;
                let r = self.pop_num()?;
                host.set_stroke_style(r, g, b);
                Ok(())
            }
            Builtin::Rectangle => {
                let y1 = self.pop_num()?;
                let x1 = self.pop_num()?;
                let y0 = self.pop_num()?;
                let x0 = self.pop_num()?;
                host.rectangle(x0, y0, x1, y1);
                Ok(())
            }
            Builtin::BeginPath => {
                host.begin_path();
                Ok(())
            }
            Builtin::MoveTo => {
                let y = self.pop_num()?;
                let x = self.pop_num()?;
                host.move_to(x, y);
                Ok(())
            }
            Builtin::LineTo => {
                let y = self.pop_num()?;
                let x = self.pop_num()?;
                host.line_to(x, y);
                Ok(())
            }
            Builtin::Stroke => {
                host.stroke();
                Ok(())
            }
            Builtin::Rotate => {
                let angle = self.pop_num()?;
                host.rotate(angle);
                Ok(())
            }
            Builtin::Translate => {
                let y = self.pop_num()?;
                let x = self.pop_num()?;
                host.translate(x, y);
                Ok(())
            }
            Builtin::Save => {
                host.save();
                Ok(())
            }
            Builtin::Restore => {
                host.restore();
                Ok(())
            }
        }
    }

    /// Pop two numbers, push one number.
    fn binary_num(&mut self, op: fn(f64, f64) -> f64) -> Result<(), RuntimeError> {
        let b = self.pop_num()?;
        let a = self.pop_num()?;
        self.push(Value::Num(op(a, b)))
    }

    /// Like `binary_num` but fails on a zero divisor.
    fn checked_div(&mut self, op: fn(f64, f64) -> f64) -> Result<(), RuntimeError> {
        let b = self.pop_num()?;
        let a = self.pop_num()?;
        if b == 0.0 {
            return Err(RuntimeError::DivisionByZero { at: self.pc - 1 });
        }
        self.push(Value::Num(op(a, b)))
    }

    /// Pop two numbers, push one boolean.
    fn compare(&mut self, op: fn(f64, f64) -> bool) -> Result<(), RuntimeError> {
        let b = self.pop_num()?;
        let a = self.pop_num()?;
        self.push(Value::Bool(op(a, b)))
    }

    /// `==` / `!=`: IEEE equality on numbers; mixed types never equal.
    fn equality(&mut self, negate: bool) -> Result<(), RuntimeError> {
        let b = self.pop()?;
        let a = self.pop()?;
        let equal = match (a, b) {
            (Value::Num(x), Value::Num(y)) => x == y,
            (Value::Bool(x), Value::Bool(y)) => x == y,
            _ => false,
        };
        self.push(Value::Bool(equal != negate))
    }

    /// `n index` copies the value `n` slots below the top.
    fn exec_index(&mut self) -> Result<(), RuntimeError> {
        let n = self.pop_num()?;
        if n < 0.0 || n.fract() != 0.0 {
            return Err(RuntimeError::TypeMismatch {
                expected: "non-negative integer",
                found: "number",
                at: self.pc - 1,
            });
        }
        let n = n as usize;
        if n >= self.stack.len() {
            return Err(RuntimeError::StackUnderflow { at: self.pc - 1 });
        }
        let value = self.stack[self.stack.len() - 1 - n];
        self.push(value)
    }
}
