//! Arithmetic problem generator implementing [`battle_core::MathOracle`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use battle_core::{Difficulty, MathOracle, Operation, Problem};

/// Generates whole-number problems whose answers are never negative and
/// whose divisions are exact.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArithmeticOracle;

impl ArithmeticOracle {
    /// Operand range for addition and subtraction.
    fn additive_range(difficulty: Difficulty) -> (i64, i64) {
        match difficulty {
            Difficulty::Easy => (1, 10),
            Difficulty::Medium => (5, 50),
            Difficulty::Hard => (20, 200),
        }
    }

    /// Factor range for multiplication and division.
    fn factor_range(difficulty: Difficulty) -> (i64, i64) {
        match difficulty {
            Difficulty::Easy => (1, 5),
            Difficulty::Medium => (2, 10),
            Difficulty::Hard => (6, 15),
        }
    }
}

impl MathOracle for ArithmeticOracle {
    fn generate_problem(&self, operation: Operation, difficulty: Difficulty, seed: u64) -> Problem {
        let mut rng = StdRng::seed_from_u64(seed);

        let (left, right, answer) = match operation {
            Operation::Addition => {
                let (lo, hi) = Self::additive_range(difficulty);
                let a = rng.gen_range(lo..=hi);
                let b = rng.gen_range(lo..=hi);
                (a, b, a + b)
            }
            Operation::Subtraction => {
                let (lo, hi) = Self::additive_range(difficulty);
                let a = rng.gen_range(lo..=hi);
                let b = rng.gen_range(lo..=hi);
                let (big, small) = if a >= b { (a, b) } else { (b, a) };
                (big, small, big - small)
            }
            Operation::Multiplication => {
                let (lo, hi) = Self::factor_range(difficulty);
                let a = rng.gen_range(lo..=hi);
                let b = rng.gen_range(lo..=hi);
                (a, b, a * b)
            }
            Operation::Division => {
                let (lo, hi) = Self::factor_range(difficulty);
                let divisor = rng.gen_range(lo..=hi);
                let quotient = rng.gen_range(lo..=hi);
                (divisor * quotient, divisor, quotient)
            }
        };

        Problem {
            operation,
            difficulty,
            left,
            right,
            answer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_are_consistent() {
        for seed in 0..200 {
            for operation in [
                Operation::Addition,
                Operation::Subtraction,
                Operation::Multiplication,
                Operation::Division,
            ] {
                let p = ArithmeticOracle.generate_problem(operation, Difficulty::Hard, seed);
                let expected = match operation {
                    Operation::Addition => p.left + p.right,
                    Operation::Subtraction => p.left - p.right,
                    Operation::Multiplication => p.left * p.right,
                    Operation::Division => {
                        assert_eq!(p.left % p.right, 0);
                        p.left / p.right
                    }
                };
                assert_eq!(p.answer, expected);
                assert!(p.answer >= 0);
            }
        }
    }

    #[test]
    fn same_seed_same_problem() {
        let a = ArithmeticOracle.generate_problem(Operation::Multiplication, Difficulty::Medium, 7);
        let b = ArithmeticOracle.generate_problem(Operation::Multiplication, Difficulty::Medium, 7);
        assert_eq!(a, b);
        assert!(ArithmeticOracle.validate_answer(a.answer, &a).is_correct);
    }
}
