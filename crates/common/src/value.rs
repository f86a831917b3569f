//! The tagged stack cell and the numeric promotion rules.
//!
//! Every cell is either an int or a float; binary operations read both
//! tags, promote to float when the operands are mixed, and produce a
//! result cell with its own tag. Assignment-site coercion (INT/FLOAT)
//! is expressed by [`Value::to_int`] / [`Value::to_float`], which are
//! idempotent.

/// A stack cell: a numeric payload with an int/float type tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Integer-tagged cell.
    Int(i64),
    /// Float-tagged cell.
    Float(f64),
}

/// Two operands after promotion: both int or both float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericPair {
    /// Both operands were int-tagged; the int path applies.
    Ints(i64, i64),
    /// At least one operand was float-tagged; both are widened.
    Floats(f64, f64),
}

impl Value {
    /// True when this cell is float-tagged.
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Branch condition: nonzero payload is true.
    pub fn is_truthy(&self) -> bool {
        match *self {
            Value::Int(n) => n != 0,
            Value::Float(f) => f != 0.0,
        }
    }

    /// Coerce to an int cell. No-op when already int-tagged; a float
    /// payload truncates toward zero.
    pub fn to_int(self) -> Value {
        match self {
            Value::Int(_) => self,
            Value::Float(f) => Value::Int(f as i64),
        }
    }

    /// Coerce to a float cell. No-op when already float-tagged.
    pub fn to_float(self) -> Value {
        match self {
            Value::Int(n) => Value::Float(n as f64),
            Value::Float(_) => self,
        }
    }

    /// The payload as an integer, truncating a float-tagged cell.
    /// Frame offsets, branch destinations, and argument counts all read
    /// their cells through this.
    pub fn as_index(self) -> i64 {
        match self {
            Value::Int(n) => n,
            Value::Float(f) => f as i64,
        }
    }

    /// Promote a pair of cells per the mixed-mode rule.
    pub fn promote(a: Value, b: Value) -> NumericPair {
        match (a, b) {
            (Value::Int(x), Value::Int(y)) => NumericPair::Ints(x, y),
            (x, y) => match (x.to_float(), y.to_float()) {
                (Value::Float(fx), Value::Float(fy)) => NumericPair::Floats(fx, fy),
                _ => unreachable!("to_float always yields a float cell"),
            },
        }
    }

    /// Apply a binary arithmetic operation with promotion.
    pub fn binary(a: Value, b: Value, int_op: fn(i64, i64) -> i64, float_op: fn(f64, f64) -> f64) -> Value {
        match Value::promote(a, b) {
            NumericPair::Ints(x, y) => Value::Int(int_op(x, y)),
            NumericPair::Floats(x, y) => Value::Float(float_op(x, y)),
        }
    }

    /// Apply a comparison with promotion. Comparisons always produce an
    /// int-tagged 1 or 0.
    pub fn compare(a: Value, b: Value, int_cmp: fn(&i64, &i64) -> bool, float_cmp: fn(&f64, &f64) -> bool) -> Value {
        let result = match Value::promote(a, b) {
            NumericPair::Ints(x, y) => int_cmp(&x, &y),
            NumericPair::Floats(x, y) => float_cmp(&x, &y),
        };
        Value::Int(result as i64)
    }
}

impl Default for Value {
    /// Frame storage starts as int zero.
    fn default() -> Self {
        Value::Int(0)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
        }
    }
}
