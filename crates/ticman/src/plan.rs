//! Steps, operations and the planner seam between configuration and engine.

use serde::{Deserialize, Serialize};

/// One named shell operation in a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// What the operator sees while the step runs, e.g. `"Compiling..."`.
    pub description: String,
    /// Shell command line, handed verbatim to the shell.
    pub command: String,
}

impl Step {
    pub fn new(description: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            command: command.into(),
        }
    }
}

/// The entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Install,
    Upgrade,
    Uninstall,
    Exit,
}

impl Operation {
    /// Menu order. The cursor indexes into this.
    pub const MENU: [Operation; 4] = [
        Operation::Install,
        Operation::Upgrade,
        Operation::Uninstall,
        Operation::Exit,
    ];

    /// Whether choosing this entry starts a run (everything but `Exit`).
    pub fn starts_run(self) -> bool {
        self != Operation::Exit
    }
}

/// Turns an operation into an ordered list of steps.
///
/// The engine only ever sees this trait; where the commands come from
/// (built-in table, TOML file, test fixture) is up to the implementor.
pub trait StepPlanner: Send + Sync + 'static {
    /// The steps for `operation`, in execution order. `Exit` yields none.
    fn plan(&self, operation: Operation) -> Vec<Step>;

    /// Menu label for `operation`.
    fn label(&self, operation: Operation) -> String {
        match operation {
            Operation::Install => "Install".to_string(),
            Operation::Upgrade => "Upgrade (Rebuild)".to_string(),
            Operation::Uninstall => "Uninstall".to_string(),
            Operation::Exit => "Exit".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_is_last_and_never_starts_a_run() {
        assert_eq!(Operation::MENU.last(), Some(&Operation::Exit));
        assert!(!Operation::Exit.starts_run());
        assert!(Operation::MENU[..3].iter().all(|op| op.starts_run()));
    }
}
