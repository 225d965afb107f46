use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Addition,
        OperationKind::Subtraction,
        OperationKind::Multiplication,
        OperationKind::Division,
    ];

    /// Name used in persisted settings and shared links
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Addition => "addition",
            OperationKind::Subtraction => "subtraction",
            OperationKind::Multiplication => "multiplication",
            OperationKind::Division => "division",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            OperationKind::Addition => "+",
            OperationKind::Subtraction => "-",
            OperationKind::Multiplication => "×",
            OperationKind::Division => "÷",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "addition" => Some(OperationKind::Addition),
            "subtraction" => Some(OperationKind::Subtraction),
            "multiplication" => Some(OperationKind::Multiplication),
            "division" => Some(OperationKind::Division),
            _ => None,
        }
    }

    pub fn apply(&self, operand1: i64, operand2: i64) -> f64 {
        match self {
            OperationKind::Addition => (operand1 + operand2) as f64,
            OperationKind::Subtraction => (operand1 - operand2) as f64,
            OperationKind::Multiplication => (operand1 * operand2) as f64,
            OperationKind::Division => operand1 as f64 / operand2 as f64,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated problem. Superseded, never mutated, by the next round.
#[derive(Debug, Clone, PartialEq)]
pub struct MathProblem {
    pub operand1: i64,
    pub operand2: i64,
    pub operation: OperationKind,
    pub answer: f64,
}

impl MathProblem {
    pub fn new(operation: OperationKind, operand1: i64, operand2: i64) -> Self {
        MathProblem {
            operand1,
            operand2,
            operation,
            answer: operation.apply(operand1, operand2),
        }
    }

    pub fn question(&self) -> String {
        format!(
            "{} {} {} = ?",
            self.operand1,
            self.operation.symbol(),
            self.operand2
        )
    }
}

impl fmt::Display for MathProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.question())
    }
}
