//! Math challenge oracle interface.
//!
//! The engine never validates answers itself: the integration layer asks a
//! [`MathOracle`] for a problem, checks the player's answer with it, and hands
//! the resulting boolean to the resolvers.

use strum::{Display, EnumString};

/// Arithmetic operation of a challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    pub const fn symbol(&self) -> char {
        match self {
            Operation::Addition => '+',
            Operation::Subtraction => '-',
            Operation::Multiplication => '×',
            Operation::Division => '÷',
        }
    }
}

/// Challenge difficulty tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// A generated arithmetic problem.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problem {
    pub operation: Operation,
    pub difficulty: Difficulty,
    pub left: i64,
    pub right: i64,
    pub answer: i64,
}

impl Problem {
    /// Human-readable prompt, e.g. `"7 × 6"`.
    pub fn prompt(&self) -> String {
        format!("{} {} {}", self.left, self.operation.symbol(), self.right)
    }
}

/// Outcome of validating an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Verdict {
    pub is_correct: bool,
}

/// Oracle producing problems and judging answers.
pub trait MathOracle: Send + Sync {
    /// Generates a problem deterministically from `seed`.
    fn generate_problem(&self, operation: Operation, difficulty: Difficulty, seed: u64) -> Problem;

    /// Judges an answer against a problem.
    fn validate_answer(&self, answer: i64, problem: &Problem) -> Verdict {
        Verdict {
            is_correct: answer == problem.answer,
        }
    }
}
