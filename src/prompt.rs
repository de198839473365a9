use std::path::{Path, PathBuf};

use crate::error::Result;

/// Words that abort the wizard when typed instead of a path.
const CANCEL_KEYWORDS: &[&str] = &["sair", "exit", "quit", "q"];

const YES_ANSWERS: &[&str] = &["s", "sim", "y", "yes"];
const NO_ANSWERS: &[&str] = &["n", "nao", "não", "no"];

/// Everything the installer asks the user goes through here.
pub trait Prompter {
    /// Ask for one line of free text.
    fn text(&mut self, message: &str, help: Option<&str>) -> Result<String>;

    /// Ask a yes/no question, re-asking until the answer parses.
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

/// Console prompter backed by `inquire`.
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn text(&mut self, message: &str, help: Option<&str>) -> Result<String> {
        let mut prompt = inquire::Text::new(message);
        if let Some(help) = help {
            prompt = prompt.with_help_message(help);
        }
        Ok(prompt.prompt()?)
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        let ans = inquire::Confirm::new(message)
            .with_parser(&|ans: &str| parse_yes_no(ans).ok_or(()))
            .with_error_message("Invalid answer. Type S/Y for yes or N for no.")
            .with_help_message("(s/n)")
            .prompt()?;
        Ok(ans)
    }
}

pub fn parse_yes_no(answer: &str) -> Option<bool> {
    let answer = answer.trim().to_lowercase();
    if YES_ANSWERS.contains(&answer.as_str()) {
        Some(true)
    } else if NO_ANSWERS.contains(&answer.as_str()) {
        Some(false)
    } else {
        None
    }
}

pub fn is_cancel_keyword(input: &str) -> bool {
    CANCEL_KEYWORDS.contains(&input.trim().to_lowercase().as_str())
}

#[derive(Debug, PartialEq, Eq)]
pub enum DirectoryAnswer {
    Existing(PathBuf),
    Cancelled,
}

/// Keep asking until the user names an existing directory or types a cancel keyword.
pub fn read_existing_directory(
    prompter: &mut dyn Prompter,
    message: &str,
) -> Result<DirectoryAnswer> {
    loop {
        let input = prompter.text(message, Some("type 'sair' or 'quit' to cancel"))?;
        let input = input.trim();
        if is_cancel_keyword(input) {
            tracing::info!("cancel keyword entered");
            return Ok(DirectoryAnswer::Cancelled);
        }
        let path = Path::new(input);
        if !input.is_empty() && path.is_dir() {
            return Ok(DirectoryAnswer::Existing(absolute(path)));
        }
        tracing::debug!(input, "rejected source path");
        crate::ui::invalid_directory(input);
    }
}

/// Absolute form of `path` without resolving symlinks. Falls back to the path as given
/// if the current directory cannot be read.
pub fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Answer, ScriptedPrompter, TestDir};

    #[test]
    fn yes_no_answers() {
        for ans in ["S", "sim", " y ", "YES"] {
            assert_eq!(parse_yes_no(ans), Some(true), "{ans}");
        }
        for ans in ["n", "NAO", "Não", "no"] {
            assert_eq!(parse_yes_no(ans), Some(false), "{ans}");
        }
        assert_eq!(parse_yes_no("maybe"), None);
        assert_eq!(parse_yes_no(""), None);
    }

    #[test]
    fn cancel_keywords_ignore_case_and_spaces() {
        assert!(is_cancel_keyword("  QUIT "));
        assert!(is_cancel_keyword("Sair"));
        assert!(is_cancel_keyword("q"));
        assert!(!is_cancel_keyword("quitter"));
    }

    #[test]
    fn cancel_keyword_stops_immediately() {
        let mut prompter = ScriptedPrompter::new([Answer::text("exit")]);
        let ans = read_existing_directory(&mut prompter, "source?").unwrap();
        assert_eq!(ans, DirectoryAnswer::Cancelled);
        prompter.assert_done();
    }

    #[test]
    fn reprompts_until_directory_exists() {
        let tmp = TestDir::new();
        let missing = tmp.path().join("missing");
        let mut prompter = ScriptedPrompter::new([
            Answer::text(missing.to_str().unwrap()),
            Answer::text(""),
            Answer::text(&format!("  {}  ", tmp.path().display())),
        ]);
        let ans = read_existing_directory(&mut prompter, "source?").unwrap();
        assert_eq!(ans, DirectoryAnswer::Existing(tmp.path().to_owned()));
        prompter.assert_done();
    }

    #[test]
    fn a_file_is_not_a_directory() {
        let tmp = TestDir::new();
        let file = tmp.path().join("a.lua");
        std::fs::write(&file, "x").unwrap();
        let mut prompter = ScriptedPrompter::new([
            Answer::text(file.to_str().unwrap()),
            Answer::text("q"),
        ]);
        let ans = read_existing_directory(&mut prompter, "source?").unwrap();
        assert_eq!(ans, DirectoryAnswer::Cancelled);
    }
}
