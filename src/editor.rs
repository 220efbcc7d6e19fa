//! Code editor panel state for programming questions.

use code_runner::{ExecutionOutcome, RunEvent, RunId};
use thiserror::Error;
use tracing::debug;

use crate::host::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub id: u32,
    pub name: &'static str,
    pub extension: &'static str,
    pub template: &'static str,
}

pub static LANGUAGES: [Language; 5] = [
    Language {
        id: 71,
        name: "Python",
        extension: "py",
        template: "# Python code
def solution():
    # Write your code here
    pass

# Test your solution
if __name__ == \"__main__\":
    result = solution()
    print(result)",
    },
    Language {
        id: 63,
        name: "JavaScript",
        extension: "js",
        template: "// JavaScript code
function solution() {
    // Write your code here
}

// Test your solution
console.log(solution());",
    },
    Language {
        id: 54,
        name: "C++",
        extension: "cpp",
        template: "#include <iostream>
#include <vector>
#include <string>
using namespace std;

int main() {
    // Write your code here
    
    return 0;
}",
    },
    Language {
        id: 62,
        name: "Java",
        extension: "java",
        template: "public class Solution {
    public static void main(String[] args) {
        // Write your code here
        
    }
}",
    },
    Language {
        id: 60,
        name: "Go",
        extension: "go",
        template: "package main

import \"fmt\"

func main() {
    // Write your code here
    
}",
    },
];

/// Python.
pub fn default_language() -> &'static Language {
    &LANGUAGES[0]
}

/// Resolves a language by numeric id, name, or file extension.
pub fn find_language(query: &str) -> Option<&'static Language> {
    let query = query.trim();
    if let Ok(id) = query.parse::<u32>() {
        return LANGUAGES.iter().find(|language| language.id == id);
    }
    LANGUAGES.iter().find(|language| {
        language.name.eq_ignore_ascii_case(query) || language.extension.eq_ignore_ascii_case(query)
    })
}

pub const NO_OUTPUT: &str = "No output";
pub const TIME_LIMIT_OUTPUT: &str = "Error: Time limit exceeded";
pub const COMPILATION_ERROR_OUTPUT: &str = "Compilation error";
pub const TRANSPORT_FAILURE_OUTPUT: &str = "Error: Unable to execute code. Please try again.";
pub const CANCELLED_OUTPUT: &str = "Execution cancelled.";

/// Text shown in the output area for a terminal outcome.
pub fn outcome_output(outcome: &ExecutionOutcome) -> String {
    match outcome {
        ExecutionOutcome::Accepted { stdout, .. } | ExecutionOutcome::Other { stdout } => stdout
            .clone()
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NO_OUTPUT.to_string()),
        ExecutionOutcome::TimeLimitExceeded => TIME_LIMIT_OUTPUT.to_string(),
        ExecutionOutcome::CompileError { compile_output } => compile_output
            .clone()
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| COMPILATION_ERROR_OUTPUT.to_string()),
        ExecutionOutcome::RuntimeError { stderr } => stderr.clone(),
    }
}

fn outcome_notice(outcome: &ExecutionOutcome) -> Option<Notice> {
    match outcome {
        ExecutionOutcome::Accepted { time_secs, .. } => Some(Notice::info(
            "Code Executed Successfully",
            format!("Executed in {}s", time_secs.unwrap_or(0.0)),
        )),
        ExecutionOutcome::TimeLimitExceeded => Some(Notice::destructive(
            "Execution Error",
            "Time limit exceeded",
        )),
        ExecutionOutcome::CompileError { .. } => Some(Notice::destructive(
            "Compilation Error",
            "Check your code syntax",
        )),
        ExecutionOutcome::RuntimeError { .. } => Some(Notice::destructive(
            "Runtime Error",
            "Check your code logic",
        )),
        ExecutionOutcome::Other { .. } => None,
    }
}

/// Starts and cancels runs on behalf of the panel.
pub trait RunHost {
    fn start_run(
        &mut self,
        language_id: u32,
        source_code: String,
        stdin: String,
    ) -> Result<RunId, String>;
    fn cancel_run(&mut self, run_id: RunId);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunRejected {
    #[error("Please write some code before running.")]
    BlankCode,
    #[error("A run is already in progress.")]
    AlreadyRunning { run_id: RunId },
    #[error("{0}")]
    StartFailed(String),
}

impl RunRejected {
    pub fn notice(&self) -> Notice {
        let title = match self {
            Self::BlankCode => "No Code",
            Self::AlreadyRunning { .. } => "Run In Progress",
            Self::StartFailed(_) => "Execution Failed",
        };
        Notice::destructive(title, self.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    Idle,
    Running { run_id: RunId },
    Cancelling { run_id: RunId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorPanel {
    language: &'static Language,
    code: String,
    stdin: String,
    output: String,
    execution_time_secs: Option<f64>,
    memory_kb: Option<u64>,
    mode: PanelMode,
}

impl Default for EditorPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorPanel {
    pub fn new() -> Self {
        let language = default_language();
        Self {
            language,
            code: language.template.to_string(),
            stdin: String::new(),
            output: String::new(),
            execution_time_secs: None,
            memory_kb: None,
            mode: PanelMode::Idle,
        }
    }

    pub fn language(&self) -> &'static Language {
        self.language
    }

    /// Switches language, replacing the code with its template and clearing results.
    pub fn select_language(&mut self, language: &'static Language) {
        self.language = language;
        self.code = language.template.to_string();
        self.output.clear();
        self.execution_time_secs = None;
        self.memory_kb = None;
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    pub fn append_line(&mut self, line: &str) {
        if !self.code.is_empty() && !self.code.ends_with('\n') {
            self.code.push('\n');
        }
        self.code.push_str(line);
    }

    pub fn stdin(&self) -> &str {
        &self.stdin
    }

    pub fn set_stdin(&mut self, stdin: impl Into<String>) {
        self.stdin = stdin.into();
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn execution_time_secs(&self) -> Option<f64> {
        self.execution_time_secs
    }

    pub fn memory_kb(&self) -> Option<u64> {
        self.memory_kb
    }

    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    pub fn active_run_id(&self) -> Option<RunId> {
        match self.mode {
            PanelMode::Idle => None,
            PanelMode::Running { run_id } | PanelMode::Cancelling { run_id } => Some(run_id),
        }
    }

    pub fn is_running(&self) -> bool {
        self.active_run_id().is_some()
    }

    /// Submits the current code. Blank code never reaches the runner.
    pub fn run(&mut self, runs: &mut dyn RunHost) -> Result<RunId, RunRejected> {
        if let Some(run_id) = self.active_run_id() {
            return Err(RunRejected::AlreadyRunning { run_id });
        }
        if self.code.trim().is_empty() {
            return Err(RunRejected::BlankCode);
        }

        let run_id = runs
            .start_run(self.language.id, self.code.clone(), self.stdin.clone())
            .map_err(RunRejected::StartFailed)?;
        self.output.clear();
        self.execution_time_secs = None;
        self.memory_kb = None;
        self.mode = PanelMode::Running { run_id };
        Ok(run_id)
    }

    /// Requests cancellation of the outstanding run, if any.
    pub fn cancel(&mut self, runs: &mut dyn RunHost) -> bool {
        let PanelMode::Running { run_id } = self.mode else {
            return false;
        };
        self.mode = PanelMode::Cancelling { run_id };
        runs.cancel_run(run_id);
        true
    }

    /// Applies one lifecycle event. Events for any other run are ignored.
    pub fn apply_run_event(&mut self, event: RunEvent) -> Option<Notice> {
        if self.active_run_id() != Some(event.run_id()) {
            debug!(run_id = event.run_id(), "ignoring event for stale run");
            return None;
        }

        match event {
            RunEvent::Started { .. } => None,
            RunEvent::Finished { outcome, .. } => {
                self.output = outcome_output(&outcome);
                if let ExecutionOutcome::Accepted {
                    time_secs,
                    memory_kb,
                    ..
                } = &outcome
                {
                    self.execution_time_secs = Some(time_secs.unwrap_or(0.0));
                    self.memory_kb = Some(memory_kb.unwrap_or(0));
                }
                self.mode = PanelMode::Idle;
                outcome_notice(&outcome)
            }
            RunEvent::Failed { error, .. } => {
                self.output = TRANSPORT_FAILURE_OUTPUT.to_string();
                self.mode = PanelMode::Idle;
                Some(Notice::destructive("Execution Failed", error))
            }
            RunEvent::Cancelled { .. } => {
                self.output = CANCELLED_OUTPUT.to_string();
                self.mode = PanelMode::Idle;
                None
            }
        }
    }
}
