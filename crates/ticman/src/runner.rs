//! Running one step's command and turning the result into a report.

use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use thiserror::Error;

use crate::plan::Step;

/// How many trailing output lines a failure diagnostic carries.
pub const DIAGNOSTIC_TAIL_LINES: usize = 15;

/// Why a command did not succeed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("exited with status {0}")]
    Exit(i32),

    #[error("was terminated by a signal")]
    Terminated,

    #[error("could not start `{shell}`: {reason}")]
    Spawn { shell: String, reason: String },

    #[error("could not collect output: {0}")]
    Wait(String),
}

/// Everything a finished command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// stdout and stderr, merged in the order the command wrote them.
    pub output: String,
    pub result: Result<(), RunError>,
}

impl CommandOutput {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            result: Ok(()),
        }
    }

    pub fn failure(output: impl Into<String>, error: RunError) -> Self {
        Self {
            output: output.into(),
            result: Err(error),
        }
    }
}

/// Runs a command line to completion.
///
/// Implementations must not touch the terminal: the UI owns it for the whole
/// run.
pub trait StepRunner: Send + Sync + 'static {
    fn run(&self, command: &str) -> BoxFuture<'static, CommandOutput>;
}

/// Runs commands through `<shell> -c`.
///
/// stderr is redirected into stdout inside the shell, so the captured text
/// interleaves both streams as a terminal would show them. stdin is closed:
/// a command waiting for input fails instead of hanging the run.
///
/// Each command runs in its own process group. When `kill_on_drop` is set
/// and the run is dropped before it finishes (the operator quit), the whole
/// group is killed, so `make -j` workers die along with the shell.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    kill_on_drop: bool,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            kill_on_drop: true,
        }
    }

    /// Whether a command still running when ticman exits is killed along
    /// with everything it started (default), or left to finish on its own.
    pub fn kill_on_drop(mut self, kill: bool) -> Self {
        self.kill_on_drop = kill;
        self
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new("bash")
    }
}

impl StepRunner for ShellRunner {
    fn run(&self, command: &str) -> BoxFuture<'static, CommandOutput> {
        let shell = self.shell.clone();
        let script = format!("exec 2>&1\n{command}");
        let kill_on_drop = self.kill_on_drop;

        Box::pin(async move {
            let mut command = tokio::process::Command::new(&shell);
            command
                .arg("-c")
                .arg(&script)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(kill_on_drop);
            #[cfg(unix)]
            command.process_group(0);

            let child = match command.spawn() {
                Ok(child) => child,
                Err(err) => {
                    return CommandOutput::failure(
                        String::new(),
                        RunError::Spawn {
                            shell,
                            reason: err.to_string(),
                        },
                    )
                }
            };

            let mut group = ProcessGroup::new(child.id().filter(|_| kill_on_drop));
            let result = child.wait_with_output().await;
            group.disarm();

            let output = match result {
                Ok(output) => output,
                Err(err) => {
                    return CommandOutput::failure(String::new(), RunError::Wait(err.to_string()))
                }
            };

            // Only the shell itself can still write to stderr here.
            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            text.push_str(&String::from_utf8_lossy(&output.stderr));

            if output.status.success() {
                CommandOutput::success(text)
            } else {
                let error = match output.status.code() {
                    Some(code) => RunError::Exit(code),
                    None => RunError::Terminated,
                };
                CommandOutput::failure(text, error)
            }
        })
    }
}

/// Kills a command's process group if dropped while still armed.
struct ProcessGroup {
    leader: Option<u32>,
}

impl ProcessGroup {
    fn new(leader: Option<u32>) -> Self {
        Self { leader }
    }

    fn disarm(&mut self) {
        self.leader = None;
    }
}

impl Drop for ProcessGroup {
    fn drop(&mut self) {
        #[cfg(unix)]
        if let Some(pgid) = self.leader.take().and_then(|pid| libc::pid_t::try_from(pid).ok()) {
            tracing::info!(pgid, "killing unfinished step");
            // ESRCH only means the group is already gone.
            unsafe {
                libc::killpg(pgid, libc::SIGKILL);
            }
        }
    }
}

/// The completion of one step, as delivered back to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Captured output, verbatim.
    pub output: String,
    /// Set when the step failed: what failed, why, and the tail of its output.
    pub failure: Option<String>,
    pub elapsed: Duration,
}

impl StepReport {
    pub fn from_output(step: &Step, output: CommandOutput, elapsed: Duration) -> Self {
        let failure = output
            .result
            .err()
            .map(|error| diagnostic(step, &error, &output.output));
        Self {
            output: output.output,
            failure,
            elapsed,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

fn diagnostic(step: &Step, error: &RunError, output: &str) -> String {
    let name = step.description.trim_end_matches('.').trim_end();
    let lines: Vec<&str> = output.trim_end().lines().collect();
    let tail = &lines[lines.len().saturating_sub(DIAGNOSTIC_TAIL_LINES)..];

    let mut text = format!("{name} failed: {error}");
    if lines.len() > tail.len() {
        text.push_str(&format!("\n... ({} earlier lines in the log)", lines.len() - tail.len()));
    }
    for line in tail {
        text.push('\n');
        text.push_str(line);
    }
    text
}

/// Run `step` on `runner` and report how it went.
pub async fn execute_step(runner: Arc<dyn StepRunner>, step: Step) -> StepReport {
    tracing::info!(step = %step.description, command = %step.command, "starting step");
    let started = Instant::now();

    let output = runner.run(&step.command).await;
    let report = StepReport::from_output(&step, output, started.elapsed());

    match &report.failure {
        None => tracing::info!(
            step = %step.description,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "step finished"
        ),
        Some(diagnostic) => tracing::warn!(
            step = %step.description,
            elapsed_ms = report.elapsed.as_millis() as u64,
            %diagnostic,
            "step failed"
        ),
    }
    report
}
