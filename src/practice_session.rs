use crate::answer_evaluator::{is_answer_correct, parse_submitted_answer};
use crate::answer_options::{AnswerOptionsConfig, generate_answer_options_with_rng};
use crate::operations::{MathProblem, OperationKind};
use crate::problem_generator::generate_problem_with_rng;
use crate::test_parameters::TestParameters;
use log::{debug, info};
use rand::Rng;
use rand::rngs::ThreadRng;

/// A problem together with the multiple-choice options shown for it
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub problem: MathProblem,
    pub options: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    TryAgain,
}

/// Drives rounds for one student: generates problems, judges answers and moves on after a
/// correct one.
pub struct PracticeSession<R: Rng = ThreadRng> {
    params: TestParameters,
    operation: OperationKind,
    round: Round,
    rng: R,
}

impl PracticeSession {
    pub fn new(params: TestParameters) -> Self {
        Self::with_rng(params, rand::thread_rng())
    }
}

impl<R: Rng> PracticeSession<R> {
    pub fn with_rng(params: TestParameters, mut rng: R) -> Self {
        let params = params.sanitized();
        let operation = params.first_operation();
        let round = generate_round(&params, operation, &mut rng);
        PracticeSession {
            params,
            operation,
            round,
            rng,
        }
    }

    pub fn parameters(&self) -> &TestParameters {
        &self.params
    }

    pub fn operation(&self) -> OperationKind {
        self.operation
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn new_round(&mut self) -> &Round {
        self.round = generate_round(&self.params, self.operation, &mut self.rng);
        &self.round
    }

    /// Switches to `operation` if it is configured. Returns whether it is now active.
    pub fn set_operation(&mut self, operation: OperationKind) -> bool {
        if !self.params.operations.contains(&operation) {
            return false;
        }
        if operation != self.operation {
            self.operation = operation;
            self.new_round();
        }
        true
    }

    /// Advances to the next configured operation, wrapping around.
    pub fn cycle_operation(&mut self) -> OperationKind {
        let operations = &self.params.operations;
        let next = operations
            .iter()
            .position(|op| *op == self.operation)
            .map_or(0, |i| (i + 1) % operations.len());
        let operation = operations[next];
        self.set_operation(operation);
        self.operation
    }

    /// Replaces the settings and starts a fresh round under them.
    pub fn update_parameters(&mut self, params: TestParameters) {
        self.params = params.sanitized();
        if !self.params.operations.contains(&self.operation) {
            self.operation = self.params.first_operation();
        }
        self.new_round();
    }

    pub fn submit_text(&mut self, input: &str) -> Feedback {
        self.judge(parse_submitted_answer(input))
    }

    /// Judges the option at `index`, or returns `None` if there is no such option.
    pub fn choose_option(&mut self, index: usize) -> Option<Feedback> {
        let option = *self.round.options.get(index)?;
        Some(self.judge(option))
    }

    fn judge(&mut self, submitted: f64) -> Feedback {
        let problem = &self.round.problem;
        let is_correct = is_answer_correct(submitted, problem.answer);
        info!(
            "Answer: {} | Given: {} | Expected: {} | {}",
            problem.question(),
            submitted,
            problem.answer,
            if is_correct { "correct" } else { "incorrect" }
        );

        if is_correct {
            self.new_round();
            Feedback::Correct
        } else {
            Feedback::TryAgain
        }
    }
}

fn generate_round<R: Rng>(params: &TestParameters, operation: OperationKind, rng: &mut R) -> Round {
    let problem = generate_problem_with_rng(params, operation, rng);
    let options =
        generate_answer_options_with_rng(problem.answer, AnswerOptionsConfig::from(params), rng);
    debug!("New round: {} options {:?}", problem.question(), options);
    Round { problem, options }
}
