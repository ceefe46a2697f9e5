//! Operator vocabularies shared by the compute kernels.

use std::fmt;

use crate::Capabilities;

/// Elementwise binary operators whose operands share the element type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    And,
    Or,
    Xor,
}

impl BinaryOp {
    /// Render the operator as a human-readable symbol.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
        }
    }

    pub fn capability(&self) -> Capabilities {
        match self {
            BinaryOp::Add
            | BinaryOp::Subtract
            | BinaryOp::Multiply
            | BinaryOp::Divide
            | BinaryOp::Modulo => Capabilities::ARITHMETIC,
            BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => Capabilities::BITWISE,
        }
    }
}

/// Shift operators. The right-hand side is always a plain integer count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShiftOp {
    Left,
    Right,
}

impl ShiftOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftOp::Left => "<<",
            ShiftOp::Right => ">>",
        }
    }
}

/// Elementwise comparison operators producing boolean columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl CompareOp {
    /// Render the operator as a human-readable symbol.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::NotEq => "!=",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
        }
    }

    pub fn capability(&self) -> Capabilities {
        match self {
            CompareOp::Eq | CompareOp::NotEq => Capabilities::EQUALITY,
            _ => Capabilities::ORDERING,
        }
    }

    /// The operator obtained by swapping operands (`a < b` ⇔ `b > a`).
    pub fn flip(&self) -> CompareOp {
        match self {
            CompareOp::Eq => CompareOp::Eq,
            CompareOp::NotEq => CompareOp::NotEq,
            CompareOp::Lt => CompareOp::Gt,
            CompareOp::LtEq => CompareOp::GtEq,
            CompareOp::Gt => CompareOp::Lt,
            CompareOp::GtEq => CompareOp::LtEq,
        }
    }
}

/// Elementwise unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Abs,
    Negate,
    Not,
    Round,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Abs => "abs",
            UnaryOp::Negate => "negate",
            UnaryOp::Not => "not",
            UnaryOp::Round => "round",
        }
    }

    pub fn capability(&self) -> Capabilities {
        match self {
            UnaryOp::Abs => Capabilities::ARITHMETIC,
            UnaryOp::Negate => Capabilities::NEGATE,
            UnaryOp::Not => Capabilities::BITWISE,
            UnaryOp::Round => Capabilities::ROUNDING,
        }
    }
}

/// Column-to-scalar reductions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReduceOp {
    Sum,
    Product,
    Min,
    Max,
    All,
    Any,
}

impl ReduceOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReduceOp::Sum => "sum",
            ReduceOp::Product => "product",
            ReduceOp::Min => "min",
            ReduceOp::Max => "max",
            ReduceOp::All => "all",
            ReduceOp::Any => "any",
        }
    }

    pub fn capability(&self) -> Capabilities {
        match self {
            ReduceOp::Sum | ReduceOp::Product => Capabilities::ARITHMETIC,
            ReduceOp::Min | ReduceOp::Max => Capabilities::ORDERING,
            ReduceOp::All | ReduceOp::Any => Capabilities::LOGICAL,
        }
    }
}

/// Running (prefix) scans that rewrite a column in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CumulativeOp {
    Sum,
    Product,
    Max,
    Min,
}

impl CumulativeOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CumulativeOp::Sum => "cumulative_sum",
            CumulativeOp::Product => "cumulative_product",
            CumulativeOp::Max => "cumulative_max",
            CumulativeOp::Min => "cumulative_min",
        }
    }

    pub fn capability(&self) -> Capabilities {
        match self {
            CumulativeOp::Sum | CumulativeOp::Product => Capabilities::ARITHMETIC,
            CumulativeOp::Max | CumulativeOp::Min => Capabilities::ORDERING,
        }
    }
}

macro_rules! impl_display_via_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

impl_display_via_as_str!(BinaryOp, ShiftOp, CompareOp, UnaryOp, ReduceOp, CumulativeOp);
