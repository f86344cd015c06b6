//! The closed operation domain: the four binary operations a step may apply.

use std::fmt;

/// Number of operations; symbolic selectors range over `0..OPERATION_COUNT`.
pub const OPERATION_COUNT: i64 = 4;

/// One binary arithmetic operation applied at a combination step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operation {
    /// All operations, in selector order.
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Sub,
        Operation::Mul,
        Operation::Div,
    ];

    /// Selector value used for the symbolic per-step operation choice.
    pub fn index(self) -> i64 {
        match self {
            Operation::Add => 0,
            Operation::Sub => 1,
            Operation::Mul => 2,
            Operation::Div => 3,
        }
    }

    /// Inverse of [`Operation::index`], used when decoding a model.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Operation::Add),
            1 => Some(Operation::Sub),
            2 => Some(Operation::Mul),
            3 => Some(Operation::Div),
            _ => None,
        }
    }

    /// Concrete evaluator. `Div` is defined only for a non-zero divisor that
    /// divides the dividend exactly; the other operations are checked so an
    /// overflowing combination is reported as undefined rather than wrapped.
    pub fn apply(self, a: i64, b: i64) -> Option<i64> {
        match self {
            Operation::Add => a.checked_add(b),
            Operation::Sub => a.checked_sub(b),
            Operation::Mul => a.checked_mul(b),
            Operation::Div => {
                if b != 0 && a % b == 0 {
                    Some(a / b)
                } else {
                    None
                }
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operation::Add => "+",
            Operation::Sub => "-",
            Operation::Mul => "*",
            Operation::Div => "/",
        };
        write!(f, "{}", symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trips() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_index(op.index()), Some(op));
        }
        assert_eq!(Operation::from_index(4), None);
        assert_eq!(Operation::from_index(-1), None);
    }

    #[test]
    fn test_apply_basic_arithmetic() {
        assert_eq!(Operation::Add.apply(8, 3), Some(11));
        assert_eq!(Operation::Sub.apply(8, 10), Some(-2));
        assert_eq!(Operation::Mul.apply(50, 9), Some(450));
    }

    #[test]
    fn test_div_requires_exact_division() {
        assert_eq!(Operation::Div.apply(50, 10), Some(5));
        assert_eq!(Operation::Div.apply(50, 3), None);
        assert_eq!(Operation::Div.apply(50, 0), None);
        assert_eq!(Operation::Div.apply(0, 5), Some(0));
    }

    #[test]
    fn test_apply_reports_overflow() {
        assert_eq!(Operation::Mul.apply(i64::MAX, 2), None);
        assert_eq!(Operation::Add.apply(i64::MAX, 1), None);
    }

    #[test]
    fn test_display_symbols() {
        let rendered: Vec<String> = Operation::ALL.iter().map(Operation::to_string).collect();
        assert_eq!(rendered, ["+", "-", "*", "/"]);
    }
}
