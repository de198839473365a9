use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;
use crate::prompt::Prompter;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Scratch directory removed on drop.
pub struct TestDir {
    path: PathBuf,
}

impl TestDir {
    pub fn new() -> Self {
        let n = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let id = DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!("luamanifest_test_{n}_{id}"));
        std::fs::create_dir_all(&path).expect("create test dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(&path, contents).expect("write file");
        path
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[derive(Debug)]
pub enum Answer {
    Text(String),
    Confirm(bool),
    /// Ctrl+C.
    Interrupt,
    /// Esc.
    Escape,
}

impl Answer {
    pub fn text(value: &str) -> Self {
        Answer::Text(value.to_owned())
    }
}

/// Plays back canned answers and panics on any question it was not scripted for.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: vec![],
        }
    }

    pub fn assert_done(&self) {
        assert!(
            self.answers.is_empty(),
            "unused answers: {:?}",
            self.answers
        );
    }

    fn next(&mut self, message: &str) -> Answer {
        self.asked.push(message.to_owned());
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected question: {message}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&mut self, message: &str, _help: Option<&str>) -> Result<String> {
        match self.next(message) {
            Answer::Text(value) => Ok(value),
            Answer::Interrupt => Err(crate::error::Error::Interrupted),
            Answer::Escape => Err(crate::error::Error::Cancelled),
            other => panic!("expected text answer for {message:?}, scripted {other:?}"),
        }
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        match self.next(message) {
            Answer::Confirm(value) => Ok(value),
            Answer::Interrupt => Err(crate::error::Error::Interrupted),
            Answer::Escape => Err(crate::error::Error::Cancelled),
            other => panic!("expected yes/no answer for {message:?}, scripted {other:?}"),
        }
    }
}
