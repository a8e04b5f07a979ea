use std::io;
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolveError {
    /// The solver refused the string. `reason` is its message, untouched.
    #[error("invalid cube state {state}: {reason}")]
    InvalidCubeState { state: String, reason: String },

    #[error("failed to run solver `{command}`: {source}")]
    Launch { command: String, source: io::Error },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub moves: Vec<String>,
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.moves.join(" "))
    }
}

impl Solution {
    pub fn parse(text: &str) -> Self {
        Self {
            moves: text.split_whitespace().map(str::to_owned).collect(),
        }
    }
}

/// Turns a 54-character facelet string into a move sequence.
pub trait CubeSolver {
    fn solve(&mut self, state: &str) -> Result<Solution, SolveError>;
}

/// Runs an external solver program, passing the state as the last argument.
///
/// Exit status 0 with moves on stdout is a solution. A non-zero exit, or
/// stdout starting with `Error`, is a rejected state.
#[derive(Debug, Clone)]
pub struct CommandSolver {
    command: String,
    args: Vec<String>,
}

impl CommandSolver {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

impl CubeSolver for CommandSolver {
    fn solve(&mut self, state: &str) -> Result<Solution, SolveError> {
        tracing::debug!(command = %self.command, %state, "Invoking solver");
        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(state)
            .output()
            .map_err(|source| SolveError::Launch {
                command: self.command.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !output.status.success() || stdout.starts_with("Error") {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let reason = if stderr.is_empty() { stdout } else { stderr };
            return Err(SolveError::InvalidCubeState {
                state: state.to_string(),
                reason,
            });
        }
        Ok(Solution::parse(&stdout))
    }
}
