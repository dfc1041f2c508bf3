//! Demonstration generators bundled with the binary.
//!
//! Real generators live outside this workspace; these two exist so
//! `folio generate` produces worksheets out of the box.

use std::sync::Arc;

use folio_core::{Difficulty, ProblemRecord, TopicKey, TopicType, Unit};
use folio_registry::{Capability, CapabilityError, CapabilityRegistry};
use rand::Rng;

/// Registry pre-populated with the bundled generators.
pub fn registry() -> CapabilityRegistry {
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(
        TopicKey::new(Unit::whole(2), TopicType::Intro, "One-Step Equations"),
        Arc::new(|difficulty: Difficulty, count: u32| -> Result<Vec<ProblemRecord>, CapabilityError> {
            Ok(one_step_equations(&mut rand::thread_rng(), difficulty, count))
        }) as Arc<dyn Capability>,
    );
    registry.register_capability(
        TopicKey::new(Unit::whole(3), TopicType::Graphing, "Linear Inequalities"),
        Arc::new(|difficulty: Difficulty, count: u32| -> Result<Vec<ProblemRecord>, CapabilityError> {
            linear_inequalities(&mut rand::thread_rng(), difficulty, count)
        }) as Arc<dyn Capability>,
    );
    registry
}

const fn coefficient_limit(difficulty: Difficulty) -> i64 {
    match difficulty {
        Difficulty::Easy => 10,
        Difficulty::Medium => 25,
        Difficulty::Hard => 60,
        Difficulty::Challenge => 150,
    }
}

/// `x + a = b` and `a·x = b` with integer solutions.
fn one_step_equations(rng: &mut impl Rng, difficulty: Difficulty, count: u32) -> Vec<ProblemRecord> {
    let limit = coefficient_limit(difficulty);
    (0..count)
        .map(|_| {
            let x = rng.gen_range(-limit..=limit);
            let a = rng.gen_range(2..=limit.max(3));
            if rng.gen_bool(0.5) {
                let b = x + a;
                ProblemRecord {
                    display_form: format!("x + {a} = {b}"),
                    canonical_answer: format!("x = {x}"),
                    solution_steps: vec![format!("Subtract {a} from both sides"), format!("x = {x}")],
                    difficulty,
                }
            } else {
                let b = a * x;
                ProblemRecord {
                    display_form: format!("{a}x = {b}"),
                    canonical_answer: format!("x = {x}"),
                    solution_steps: vec![format!("Divide both sides by {a}"), format!("x = {x}")],
                    difficulty,
                }
            }
        })
        .collect()
}

/// `x > a` style inequalities with a number-line description.
fn linear_inequalities(
    rng: &mut impl Rng,
    difficulty: Difficulty,
    count: u32,
) -> Result<Vec<ProblemRecord>, CapabilityError> {
    if difficulty == Difficulty::Challenge {
        return Err(CapabilityError::UnsupportedDifficulty(difficulty));
    }

    let limit = coefficient_limit(difficulty);
    let problems = (0..count)
        .map(|_| {
            let bound = rng.gen_range(-limit..=limit);
            let shift = rng.gen_range(1..=limit);
            let (op, circle, direction) = match rng.gen_range(0..4) {
                0 => (">", "open", "right"),
                1 => (">=", "closed", "right"),
                2 => ("<", "open", "left"),
                _ => ("<=", "closed", "left"),
            };
            ProblemRecord {
                display_form: format!("Graph x + {shift} {op} {}", bound + shift),
                canonical_answer: format!("x {op} {bound}"),
                solution_steps: vec![
                    format!("Subtract {shift} from both sides: x {op} {bound}"),
                    format!("Draw an {circle} circle at {bound} and shade to the {direction}"),
                ],
                difficulty,
            }
        })
        .collect();
    Ok(problems)
}
