//! Prepared interview questions and the cursor over them.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Behavioral,
    Programming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub id: u32,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub programming_prompt: Option<String>,
}

impl Question {
    pub fn behavioral(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            kind: QuestionKind::Behavioral,
            programming_prompt: None,
        }
    }

    pub fn programming(id: u32, text: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            kind: QuestionKind::Programming,
            programming_prompt: Some(prompt.into()),
        }
    }

    pub fn is_programming(&self) -> bool {
        self.kind == QuestionKind::Programming
    }
}

#[derive(Debug, Error)]
pub enum QuestionBankError {
    #[error("failed to read question bank {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse question bank {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("question bank is empty")]
    Empty,
    #[error("question id {id} appears more than once")]
    DuplicateId { id: u32 },
    #[error("programming question {id} has no programming prompt")]
    MissingPrompt { id: u32 },
    #[error("question {id} has empty text")]
    EmptyText { id: u32 },
}

/// A validated, non-empty, immutable question sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        if questions.is_empty() {
            return Err(QuestionBankError::Empty);
        }

        let mut seen = BTreeSet::new();
        for question in &questions {
            if !seen.insert(question.id) {
                return Err(QuestionBankError::DuplicateId { id: question.id });
            }
            if question.text.trim().is_empty() {
                return Err(QuestionBankError::EmptyText { id: question.id });
            }
            let has_prompt = question
                .programming_prompt
                .as_deref()
                .is_some_and(|prompt| !prompt.trim().is_empty());
            if question.is_programming() && !has_prompt {
                return Err(QuestionBankError::MissingPrompt { id: question.id });
            }
        }

        Ok(Self { questions })
    }

    pub fn from_json_str(raw: &str, path: &Path) -> Result<Self, QuestionBankError> {
        let questions: Vec<Question> =
            serde_json::from_str(raw).map_err(|source| QuestionBankError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(questions)
    }

    pub fn load(path: &Path) -> Result<Self, QuestionBankError> {
        let raw = fs::read_to_string(path).map_err(|source| QuestionBankError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw, path)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self {
            questions: default_questions(),
        }
    }
}

const TWO_SUM_PROMPT: &str = "Problem: Two Sum

Given an array of integers nums and an integer target, return indices of the two numbers such that they add up to target.

You may assume that each input would have exactly one solution, and you may not use the same element twice.

Example:
Input: nums = [2,7,11,15], target = 9
Output: [0,1]
Explanation: Because nums[0] + nums[1] == 9, we return [0, 1].

Constraints:
- 2 <= nums.length <= 10^4
- -10^9 <= nums[i] <= 10^9
- -10^9 <= target <= 10^9
- Only one valid answer exists.";

const REVERSE_LIST_PROMPT: &str = "Problem: Reverse Linked List

Given the head of a singly linked list, reverse the list, and return the reversed list.

Example:
Input: head = [1,2,3,4,5]
Output: [5,4,3,2,1]

Definition for singly-linked list:
class ListNode {
    int val;
    ListNode next;
    ListNode() {}
    ListNode(int val) { this.val = val; }
    ListNode(int val, ListNode next) { this.val = val; this.next = next; }
}

Constraints:
- The number of nodes in the list is the range [0, 5000].
- -5000 <= Node.val <= 5000";

/// The built-in six-question interview.
pub fn default_questions() -> Vec<Question> {
    vec![
        Question::behavioral(
            1,
            "Tell me about yourself and your background in software development.",
        ),
        Question::behavioral(
            2,
            "What is your experience with React and modern frontend frameworks?",
        ),
        Question::programming(
            3,
            "Write a function to find the two numbers in an array that add up to a target sum.",
            TWO_SUM_PROMPT,
        ),
        Question::behavioral(
            4,
            "How do you handle state management in large applications?",
        ),
        Question::programming(
            5,
            "Implement a function to reverse a linked list.",
            REVERSE_LIST_PROMPT,
        ),
        Question::behavioral(
            6,
            "What are your strengths and weaknesses as a developer?",
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("question index {index} is out of range for {len} questions")]
pub struct OutOfRangeError {
    pub index: usize,
    pub len: usize,
}

/// Result of [`QuestionRunner::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance<'a> {
    Next(&'a Question),
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRunner {
    questions: Vec<Question>,
    index: usize,
}

impl Default for QuestionRunner {
    fn default() -> Self {
        Self::from_bank(QuestionBank::default())
    }
}

impl QuestionRunner {
    /// Unvalidated construction; an empty list makes [`Self::current`] fail.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            index: 0,
        }
    }

    pub fn from_bank(bank: QuestionBank) -> Self {
        Self::new(bank.questions)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.questions.len()
    }

    pub fn current(&self) -> Result<&Question, OutOfRangeError> {
        self.questions.get(self.index).ok_or(OutOfRangeError {
            index: self.index,
            len: self.questions.len(),
        })
    }

    /// Moves to the next question, or reports completion on the last one
    /// without moving.
    pub fn advance(&mut self) -> Advance<'_> {
        if self.is_last() {
            return Advance::Completed;
        }
        self.index += 1;
        Advance::Next(&self.questions[self.index])
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// `(index + 1) / len`, or 0 when there are no questions.
    pub fn progress_fraction(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        (self.index + 1) as f64 / self.questions.len() as f64
    }

    /// "Question {n} of {N}".
    pub fn position_label(&self) -> String {
        format!("Question {} of {}", self.index + 1, self.questions.len())
    }
}
