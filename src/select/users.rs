//! User selection.
//!
//! Users are the distinct addresses in the log, sorted. The operator answers
//! with a blank line (keep everyone) or comma-separated 1-based indices.
//! Indices outside the list are dropped; a token that is not a number, or an
//! answer that leaves nobody selected, is rejected and the list is shown again.

use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use thiserror::Error;

use crate::console::Console;
use crate::core::models::{Record, UserSelection};
use crate::error::{Result, SmsFilterError};

const USER_PROMPT: &str = "Choose user(s) by entering the corresponding number(s), separated by commas (press ENTER button for all users) ";

/// Distinct addresses, deduplicated and sorted.
pub fn distinct_users(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(Record::address)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// A parsed answer to the user prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserChoice {
    /// Blank: every user.
    All,
    /// 0-based positions of the chosen users, in answer order.
    Indices(Vec<usize>),
}

/// Why an answer to the user prompt was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserChoiceError {
    #[error("Invalid input '{0}'. Please enter numbers separated by commas.")]
    NotANumber(String),

    #[error("No valid user selection. Please try again.")]
    NothingSelected,
}

/// Interprets an answer to the user prompt against a list of `len` users.
pub fn parse_user_choice(input: &str, len: usize) -> std::result::Result<UserChoice, UserChoiceError> {
    if input.trim().is_empty() {
        return Ok(UserChoice::All);
    }

    let mut indices = Vec::new();
    for token in input.split(',') {
        let token = token.trim();
        let n: i64 = token
            .parse()
            .map_err(|_| UserChoiceError::NotANumber(token.to_string()))?;

        match usize::try_from(n) {
            Ok(n) if (1..=len).contains(&n) => indices.push(n - 1),
            _ => tracing::debug!(index = n, "dropping out-of-range user index"),
        }
    }

    if indices.is_empty() {
        return Err(UserChoiceError::NothingSelected);
    }
    Ok(UserChoice::Indices(indices))
}

/// Runs the user dialogue until a usable answer is given.
///
/// # Errors
///
/// [`SmsFilterError::InputClosed`] if input ends before a usable answer.
pub fn select_users<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    users: &[String],
) -> Result<UserSelection> {
    loop {
        console.list("Available users:", users)?;

        let answer = console
            .ask(USER_PROMPT)?
            .ok_or_else(|| SmsFilterError::input_closed("user"))?;

        match parse_user_choice(&answer, users.len()) {
            Ok(UserChoice::All) => return Ok(UserSelection::all()),
            Ok(UserChoice::Indices(indices)) => {
                let selection = UserSelection::of(indices.into_iter().map(|i| users[i].as_str()));
                tracing::debug!(count = selection.len(), "users selected");
                return Ok(selection);
            }
            Err(err) => console.say(err)?,
        }
    }
}
