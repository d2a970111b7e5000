//! Post-copy bootstrap: git init, dependency install, initial commit
//!
//! Each step is an external command run in the freshly scaffolded
//! directory. A step failing does not abort the scaffold: the runner
//! records what happened to every step and a policy decides whether the
//! remaining steps still run.

use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command as TokioCommand};

/// Commit message for the scaffold's first commit
pub const COMMIT_MESSAGE: &str = "chore: initial commit";

/// One external command in the bootstrap sequence
#[derive(Debug, Clone)]
pub struct BootstrapStep {
    /// Short label used when reporting the step's outcome
    pub label: &'static str,
    pub program: &'static str,
    pub args: Vec<String>,
}

impl BootstrapStep {
    pub fn new(label: &'static str, program: &'static str, args: &[&str]) -> Self {
        Self {
            label,
            program,
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// The command as it would be typed in a shell
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.to_string()];
        for arg in &self.args {
            if arg.contains(' ') {
                parts.push(format!("\"{}\"", arg));
            } else {
                parts.push(arg.clone());
            }
        }
        parts.join(" ")
    }
}

/// The sequence run after template files land
pub fn standard_steps() -> Vec<BootstrapStep> {
    vec![
        BootstrapStep::new("Initialize git repository", "git", &["init"]),
        BootstrapStep::new("Install dependencies", "pnpm", &["install"]),
        BootstrapStep::new("Stage files", "git", &["add", "."]),
        BootstrapStep::new(
            "Create initial commit",
            "git",
            &["commit", "-m", COMMIT_MESSAGE],
        ),
    ]
}

/// How the runner reacts to a failed step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Run every remaining step regardless
    #[default]
    Continue,
    /// Stop at the first failure
    Halt,
}

/// What happened to a single step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Success,
    /// The process ran and exited non-zero (code is `None` when killed
    /// by a signal)
    Failed { code: Option<i32> },
    /// The process could not be started
    SpawnError { message: String },
}

impl StepStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, StepStatus::Success)
    }
}

/// Output collected from a step while it was streamed to the terminal
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

/// Recorded outcome of one step
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub label: &'static str,
    pub command: String,
    pub status: StepStatus,
    pub output: CapturedOutput,
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// One-line description for warnings and summaries
    pub fn describe(&self) -> String {
        match &self.status {
            StepStatus::Success => format!("{} succeeded", self.label),
            StepStatus::Failed { code: Some(code) } => {
                format!("{} failed (`{}` exited with code {})", self.label, self.command, code)
            }
            StepStatus::Failed { code: None } => {
                format!("{} failed (`{}` was terminated)", self.label, self.command)
            }
            StepStatus::SpawnError { message } => {
                format!("{} could not start (`{}`: {})", self.label, self.command, message)
            }
        }
    }
}

/// Run the bootstrap sequence in `dir`, streaming output as it arrives.
///
/// Returns one outcome per attempted step, in execution order. Under
/// [`FailurePolicy::Continue`] every step is attempted; under
/// [`FailurePolicy::Halt`] the sequence stops after the first failure,
/// so skipped steps produce no outcome at all.
pub async fn run_steps(
    dir: &Path,
    steps: &[BootstrapStep],
    policy: FailurePolicy,
) -> Vec<StepOutcome> {
    let mut outcomes = Vec::new();

    for step in steps {
        println!();
        println!("{} {}", "Running:".dimmed(), step.command_line().yellow());

        let outcome = run_one(dir, step).await;
        if let StepStatus::Failed { code } = &outcome.status {
            let code = code.map_or("signal".to_string(), |c| c.to_string());
            println!("{}", format!("  exited with {}", code).red());
        } else if let StepStatus::SpawnError { message } = &outcome.status {
            println!("{}", format!("  could not start: {}", message).red());
        }

        let halt = policy == FailurePolicy::Halt && !outcome.is_success();
        outcomes.push(outcome);
        if halt {
            break;
        }
    }

    outcomes
}

async fn run_one(dir: &Path, step: &BootstrapStep) -> StepOutcome {
    let spawned = TokioCommand::new(step.program)
        .args(&step.args)
        .current_dir(dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            return StepOutcome {
                label: step.label,
                command: step.command_line(),
                status: StepStatus::SpawnError {
                    message: e.to_string(),
                },
                output: CapturedOutput::default(),
            }
        }
    };

    let output = stream_output(&mut child).await;

    let status = match child.wait().await {
        Ok(status) if status.success() => StepStatus::Success,
        Ok(status) => StepStatus::Failed {
            code: status.code(),
        },
        Err(e) => StepStatus::SpawnError {
            message: e.to_string(),
        },
    };

    StepOutcome {
        label: step.label,
        command: step.command_line(),
        status,
        output,
    }
}

/// Stream a child's stdout (indented) and stderr (yellow) until both
/// close, keeping every line for the step's outcome record
pub(crate) async fn stream_output(child: &mut Child) -> CapturedOutput {
    let stderr_task = child.stderr.take().map(|stderr| {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            let mut captured = Vec::new();
            while let Ok(Some(line)) = lines.next_line().await {
                eprintln!("  {}", line.yellow());
                captured.push(line);
            }
            captured
        })
    });

    let mut stdout = Vec::new();
    if let Some(out) = child.stdout.take() {
        let mut lines = BufReader::new(out).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            println!("  {}", line);
            stdout.push(line);
        }
    }

    let stderr = match stderr_task {
        Some(task) => task.await.unwrap_or_default(),
        None => Vec::new(),
    };

    CapturedOutput { stdout, stderr }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell_step(label: &'static str, script: &str) -> BootstrapStep {
        BootstrapStep {
            label,
            program: "sh",
            args: vec!["-c".to_string(), script.to_string()],
        }
    }

    #[test]
    fn test_standard_sequence_order() {
        let steps = standard_steps();
        let commands: Vec<_> = steps.iter().map(|s| s.command_line()).collect();
        assert_eq!(
            commands,
            vec![
                "git init",
                "pnpm install",
                "git add .",
                "git commit -m \"chore: initial commit\"",
            ]
        );
    }

    #[tokio::test]
    async fn test_steps_run_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let steps = vec![
            shell_step("first", "echo 1 >> order.log"),
            shell_step("second", "echo 2 >> order.log"),
            shell_step("third", "echo 3 >> order.log"),
        ];

        let outcomes = run_steps(dir.path(), &steps, FailurePolicy::Continue).await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes.iter().all(|o| o.is_success()));
        let log = std::fs::read_to_string(dir.path().join("order.log")).unwrap();
        assert_eq!(log, "1\n2\n3\n");
    }

    #[tokio::test]
    async fn test_output_is_streamed_and_captured() {
        let dir = tempfile::tempdir().unwrap();
        let steps = vec![shell_step("greet", "echo hello; echo oops >&2")];

        let outcomes = run_steps(dir.path(), &steps, FailurePolicy::Continue).await;

        assert_eq!(outcomes[0].output.stdout, vec!["hello"]);
        assert_eq!(outcomes[0].output.stderr, vec!["oops"]);
    }

    #[tokio::test]
    async fn test_continue_policy_attempts_every_step() {
        let dir = tempfile::tempdir().unwrap();
        let steps = vec![
            shell_step("first", "true"),
            shell_step("second", "exit 3"),
            shell_step("third", "echo ran > after-failure"),
        ];

        let outcomes = run_steps(dir.path(), &steps, FailurePolicy::Continue).await;

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[1].status, StepStatus::Failed { code: Some(3) });
        assert!(outcomes[2].is_success());
        assert!(dir.path().join("after-failure").exists());
    }

    #[tokio::test]
    async fn test_halt_policy_stops_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let steps = vec![
            shell_step("first", "exit 1"),
            shell_step("second", "echo ran > should-not-exist"),
        ];

        let outcomes = run_steps(dir.path(), &steps, FailurePolicy::Halt).await;

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].status, StepStatus::Failed { code: Some(1) });
        assert!(!dir.path().join("should-not-exist").exists());
    }

    #[tokio::test]
    async fn test_missing_program_becomes_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let steps = vec![
            BootstrapStep::new("ghost", "definitely-not-a-real-binary-zzz", &[]),
            shell_step("after", "true"),
        ];

        let outcomes = run_steps(dir.path(), &steps, FailurePolicy::Continue).await;

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0].status, StepStatus::SpawnError { .. }));
        assert!(outcomes[1].is_success());
    }

    #[test]
    fn test_describe_mentions_command_and_code() {
        let outcome = StepOutcome {
            label: "Install dependencies",
            command: "pnpm install".to_string(),
            status: StepStatus::Failed { code: Some(127) },
            output: CapturedOutput::default(),
        };
        let text = outcome.describe();
        assert!(text.contains("pnpm install"));
        assert!(text.contains("127"));
    }
}
