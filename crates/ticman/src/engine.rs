//! The execution state machine.
//!
//! [`Engine`] owns the menu cursor, the run phase and the transcript. It never
//! performs I/O: every transition returns an [`Effect`] telling the caller what
//! to do next, and the caller reports each finished step back through
//! [`Engine::complete`]. A new step is only ever requested from `complete`
//! (or from `confirm` for step 0), so at most one step is in flight.

use std::sync::Arc;

use crate::plan::{Operation, Step, StepPlanner};
use crate::runner::StepReport;
use crate::transcript::Transcript;

/// How a finished run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure { diagnostic: String },
}

/// Where the installer is. Each variant carries exactly the data that is
/// meaningful in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Choosing an operation. No steps are loaded.
    Menu,
    /// Step `current` is executing; `current < steps.len()`.
    Running {
        operation: Operation,
        steps: Vec<Step>,
        current: usize,
    },
    /// The run is over. On success `current == steps.len()`; on failure it is
    /// the index of the step that failed.
    Done {
        operation: Operation,
        steps: Vec<Step>,
        current: usize,
        outcome: Outcome,
    },
}

/// What the caller must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Run `step` and report back with `complete(index, ..)`.
    Execute { index: usize, step: Step },
    Quit,
}

pub struct Engine {
    planner: Arc<dyn StepPlanner>,
    cursor: usize,
    phase: Phase,
    transcript: Transcript,
}

impl Engine {
    pub fn new(planner: Arc<dyn StepPlanner>) -> Self {
        Self {
            planner,
            cursor: 0,
            phase: Phase::Menu,
            transcript: Transcript::new(),
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Operation {
        Operation::MENU[self.cursor]
    }

    /// Menu labels in display order.
    pub fn labels(&self) -> Vec<String> {
        Operation::MENU
            .iter()
            .map(|op| self.planner.label(*op))
            .collect()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_menu(&self) -> bool {
        matches!(self.phase, Phase::Menu)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done { .. })
    }

    /// The operation being run or last run, if any.
    pub fn operation(&self) -> Option<Operation> {
        match &self.phase {
            Phase::Menu => None,
            Phase::Running { operation, .. } | Phase::Done { operation, .. } => Some(*operation),
        }
    }

    pub fn steps(&self) -> &[Step] {
        match &self.phase {
            Phase::Menu => &[],
            Phase::Running { steps, .. } | Phase::Done { steps, .. } => steps,
        }
    }

    pub fn current_step(&self) -> usize {
        match &self.phase {
            Phase::Menu => 0,
            Phase::Running { current, .. } | Phase::Done { current, .. } => *current,
        }
    }

    /// The step currently executing.
    pub fn running_step(&self) -> Option<&Step> {
        match &self.phase {
            Phase::Running { steps, current, .. } => steps.get(*current),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.phase {
            Phase::Done { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        match self.outcome() {
            Some(Outcome::Failure { diagnostic }) => Some(diagnostic),
            _ => None,
        }
    }

    pub fn move_up(&mut self) {
        if self.is_menu() {
            self.cursor = self.cursor.saturating_sub(1);
        }
    }

    pub fn move_down(&mut self) {
        if self.is_menu() && self.cursor + 1 < Operation::MENU.len() {
            self.cursor += 1;
        }
    }

    /// The Enter key: start the selected operation from the menu, or leave
    /// once a run is over. Ignored while running.
    pub fn confirm(&mut self) -> Effect {
        match self.phase {
            Phase::Menu => {
                let operation = self.selected();
                if operation.starts_run() {
                    self.start(operation)
                } else {
                    Effect::Quit
                }
            }
            Phase::Running { .. } => Effect::None,
            Phase::Done { .. } => Effect::Quit,
        }
    }

    fn start(&mut self, operation: Operation) -> Effect {
        let steps = self.planner.plan(operation);
        self.transcript.clear();
        tracing::info!(?operation, steps = steps.len(), "starting run");

        match steps.first().cloned() {
            Some(step) => {
                self.phase = Phase::Running {
                    operation,
                    steps,
                    current: 0,
                };
                Effect::Execute { index: 0, step }
            }
            None => {
                self.phase = Phase::Done {
                    operation,
                    steps,
                    current: 0,
                    outcome: Outcome::Success,
                };
                Effect::None
            }
        }
    }

    /// Record the completion of step `index` and advance.
    ///
    /// A completion for any step other than the one in flight is dropped.
    pub fn complete(&mut self, index: usize, report: StepReport) -> Effect {
        let (operation, steps, current) = match std::mem::replace(&mut self.phase, Phase::Menu) {
            Phase::Running {
                operation,
                steps,
                current,
            } if current == index => (operation, steps, current),
            other => {
                tracing::warn!(index, phase = ?other, "ignoring stale step completion");
                self.phase = other;
                return Effect::None;
            }
        };

        self.transcript
            .record(&steps[current].description, &report.output);

        if let Some(diagnostic) = report.failure {
            tracing::info!(?operation, failed_step = current, "run failed");
            self.phase = Phase::Done {
                operation,
                steps,
                current,
                outcome: Outcome::Failure { diagnostic },
            };
            return Effect::None;
        }

        let next = current + 1;
        match steps.get(next).cloned() {
            Some(step) => {
                self.phase = Phase::Running {
                    operation,
                    steps,
                    current: next,
                };
                Effect::Execute { index: next, step }
            }
            None => {
                tracing::info!(?operation, steps = steps.len(), "run completed");
                self.phase = Phase::Done {
                    operation,
                    steps,
                    current: next,
                    outcome: Outcome::Success,
                };
                Effect::None
            }
        }
    }

    /// Leave a finished run and show the menu again. Returns whether
    /// anything changed.
    pub fn back_to_menu(&mut self) -> bool {
        if !self.is_done() {
            return false;
        }
        self.phase = Phase::Menu;
        self.cursor = 0;
        self.transcript.clear();
        true
    }
}
