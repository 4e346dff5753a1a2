//! Scripted terminal for driving the question flow in tests.

use std::collections::VecDeque;
use std::io;

use crate::prompt::Prompter;

pub(crate) enum Reply {
    Text(&'static str),
    Confirm(bool),
    Select(usize),
    Multi(Vec<usize>),
    Fail,
}

/// Plays back canned replies and records every prompt it was shown.
pub(crate) struct ScriptedPrompter {
    replies: VecDeque<Reply>,
    pub(crate) asked: Vec<String>,
    pub(crate) multi_defaults: Vec<bool>,
    pub(crate) restored: bool,
}

impl ScriptedPrompter {
    pub(crate) fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: replies.into(),
            asked: Vec::new(),
            multi_defaults: Vec::new(),
            restored: false,
        }
    }

    fn next(&mut self, prompt: &str) -> Result<Reply, dialoguer::Error> {
        self.asked.push(prompt.to_string());
        match self.replies.pop_front() {
            Some(Reply::Fail) | None => Err(dialoguer::Error::IO(io::Error::new(
                io::ErrorKind::Interrupted,
                "interrupted",
            ))),
            Some(reply) => Ok(reply),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String, dialoguer::Error> {
        match self.next(prompt)? {
            Reply::Text("") => Ok(default.unwrap_or_default().to_string()),
            Reply::Text(text) => Ok(text.to_string()),
            _ => panic!("unexpected input prompt {prompt}"),
        }
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> Result<bool, dialoguer::Error> {
        match self.next(prompt)? {
            Reply::Confirm(value) => Ok(value),
            _ => panic!("unexpected confirm prompt {prompt}"),
        }
    }

    fn select(&mut self, prompt: &str, _items: &[&str]) -> Result<usize, dialoguer::Error> {
        match self.next(prompt)? {
            Reply::Select(index) => Ok(index),
            _ => panic!("unexpected select prompt {prompt}"),
        }
    }

    fn multi_select(
        &mut self,
        prompt: &str,
        _items: &[&str],
        defaults: &[bool],
    ) -> Result<Vec<usize>, dialoguer::Error> {
        self.multi_defaults = defaults.to_vec();
        match self.next(prompt)? {
            Reply::Multi(indices) => Ok(indices),
            _ => panic!("unexpected multi select prompt {prompt}"),
        }
    }

    fn restore(&mut self) {
        self.restored = true;
    }
}

/// Answers for project "Demo" with `after_name` spliced in where the
/// overwrite confirmation would appear.
pub(crate) fn full_script(after_name: Vec<Reply>) -> Vec<Reply> {
    let mut replies = vec![Reply::Text("Demo")];
    replies.extend(after_name);
    replies.extend([
        Reply::Text("alice"),
        Reply::Text("2.0.0"),
        Reply::Text("demo app"),
        Reply::Text(""),
        Reply::Select(0),
        Reply::Multi(vec![1]),
    ]);
    replies
}
