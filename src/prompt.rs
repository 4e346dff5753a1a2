//! Interactive collection of the [`AnswerSet`].
//!
//! Terminal access goes through [`Prompter`] so the question flow can be
//! driven by a script in tests. [`TerminalPrompter`] is the `dialoguer`
//! backed implementation used by the binary.

use std::collections::BTreeSet;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::answers::{
    AnswerSet, DEFAULT_AUTHOR, DEFAULT_DESCRIPTION, DEFAULT_PROJECT_NAME, DEFAULT_VERSION,
    License, OptionalDependency, dir_name_for,
};

const OVERWRITE_DIRECTORY_PROMPT: &str = "The directory already exists. Do you want to overwrite all files related to project initialization in the folder?";
const REPLACE_FILE_PROMPT: &str =
    "The file already exists. Do you want to delete it and create the project?";

pub trait Prompter {
    /// Free text. `default` is returned when the operator enters nothing.
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String, dialoguer::Error>;

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, dialoguer::Error>;

    /// Returns the index of the chosen item.
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize, dialoguer::Error>;

    /// Returns the indices of the checked items.
    fn multi_select(
        &mut self,
        prompt: &str,
        items: &[&str],
        defaults: &[bool],
    ) -> Result<Vec<usize>, dialoguer::Error>;

    /// Puts the terminal back in a usable state after an abort.
    fn restore(&mut self) {}
}

/// Raised by the Ctrl-C handler. Once set, every further prompt fails.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct TerminalPrompter {
    theme: ColorfulTheme,
    interrupted: InterruptFlag,
}

impl TerminalPrompter {
    pub fn new(interrupted: InterruptFlag) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            interrupted,
        }
    }

    /// With a SIGINT handler installed, ^C inside a raw-mode read surfaces as
    /// an `Interrupted` error; ^C between prompts only raises the flag. Both
    /// are reported the same way.
    fn guard<T>(
        &self,
        interact: impl FnOnce(&ColorfulTheme) -> Result<T, dialoguer::Error>,
    ) -> Result<T, dialoguer::Error> {
        self.check_interrupt()?;
        let result = interact(&self.theme);
        self.check_interrupt()?;
        result
    }

    fn check_interrupt(&self) -> Result<(), dialoguer::Error> {
        if self.interrupted.is_raised() {
            return Err(dialoguer::Error::IO(io::Error::new(
                io::ErrorKind::Interrupted,
                "interrupted by Ctrl-C",
            )));
        }
        Ok(())
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String, dialoguer::Error> {
        self.guard(|theme| {
            let mut input = Input::<String>::with_theme(theme)
                .with_prompt(prompt)
                .allow_empty(true);
            if let Some(default) = default {
                input = input.default(default.to_string());
            }
            input.interact_text()
        })
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, dialoguer::Error> {
        self.guard(|theme| {
            Confirm::with_theme(theme)
                .with_prompt(prompt)
                .default(default)
                .interact()
        })
    }

    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize, dialoguer::Error> {
        self.guard(|theme| {
            Select::with_theme(theme)
                .with_prompt(prompt)
                .items(items)
                .interact()
        })
    }

    fn multi_select(
        &mut self,
        prompt: &str,
        items: &[&str],
        defaults: &[bool],
    ) -> Result<Vec<usize>, dialoguer::Error> {
        self.guard(|theme| {
            MultiSelect::with_theme(theme)
                .with_prompt(prompt)
                .items(items)
                .defaults(defaults)
                .interact()
        })
    }

    fn restore(&mut self) {
        // Select and MultiSelect hide the cursor and are cut short by ^C.
        if let Err(err) = Term::stderr().show_cursor() {
            tracing::debug!(error = %err, "could not restore cursor");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    DeclinedDirectoryOverwrite,
    DeclinedFileReplacement,
    Interrupted,
}

impl AbortReason {
    /// Declining to replace a plain file exits non-zero; every other abort
    /// exits cleanly.
    pub fn exit_code(&self) -> i32 {
        match self {
            AbortReason::DeclinedFileReplacement => 1,
            AbortReason::DeclinedDirectoryOverwrite | AbortReason::Interrupted => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collected {
    Answers(AnswerSet),
    Aborted(AbortReason),
}

enum Step<T> {
    Continue(T),
    Abort(AbortReason),
}

/// Runs the question sequence. Prompt failures of any kind become
/// [`AbortReason::Interrupted`]; nothing here writes to disk.
pub fn collect(prompter: &mut dyn Prompter, base_dir: &Path) -> Collected {
    match ask_all(prompter, base_dir) {
        Ok(Step::Continue(answers)) => Collected::Answers(answers),
        Ok(Step::Abort(reason)) => Collected::Aborted(reason),
        Err(err) => {
            tracing::debug!(error = %err, "prompt failed, aborting");
            Collected::Aborted(AbortReason::Interrupted)
        }
    }
}

fn ask_all(
    prompter: &mut dyn Prompter,
    base_dir: &Path,
) -> Result<Step<AnswerSet>, dialoguer::Error> {
    let project_name = ask_text(prompter, "Project Name:", DEFAULT_PROJECT_NAME)?;

    if let Step::Abort(reason) = confirm_overwrite(prompter, base_dir, &project_name)? {
        return Ok(Step::Abort(reason));
    }

    let author = ask_text(prompter, "Author:", DEFAULT_AUTHOR)?;
    let version = ask_text(prompter, "Version:", DEFAULT_VERSION)?;
    let description = ask_text(prompter, "Description:", DEFAULT_DESCRIPTION)?;
    let homepage = prompter.input("Homepage:", None)?.trim().to_string();

    let license_labels: Vec<&str> = License::ALL.iter().map(License::as_str).collect();
    let license_index = prompter.select("License", &license_labels)?;
    let license = License::ALL
        .get(license_index)
        .copied()
        .ok_or_else(|| invalid_choice(license_index))?;

    let dependency_labels: Vec<&str> = OptionalDependency::ALL
        .iter()
        .map(OptionalDependency::label)
        .collect();
    let defaults: Vec<bool> = OptionalDependency::ALL
        .iter()
        .map(OptionalDependency::selected_by_default)
        .collect();
    let mut dependencies = BTreeSet::new();
    for index in prompter.multi_select("Dependencies", &dependency_labels, &defaults)? {
        let dependency = OptionalDependency::ALL
            .get(index)
            .copied()
            .ok_or_else(|| invalid_choice(index))?;
        dependencies.insert(dependency);
    }

    Ok(Step::Continue(AnswerSet {
        project_name,
        author,
        version,
        description,
        homepage,
        license,
        dependencies,
    }))
}

fn ask_text(
    prompter: &mut dyn Prompter,
    prompt: &str,
    default: &str,
) -> Result<String, dialoguer::Error> {
    let value = prompter.input(prompt, Some(default))?;
    let value = value.trim();
    if value.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(value.to_string())
    }
}

fn confirm_overwrite(
    prompter: &mut dyn Prompter,
    base_dir: &Path,
    project_name: &str,
) -> Result<Step<()>, dialoguer::Error> {
    let target = base_dir.join(dir_name_for(project_name));
    if !target.exists() {
        return Ok(Step::Continue(()));
    }

    let (prompt, reason) = if target.is_dir() {
        (
            OVERWRITE_DIRECTORY_PROMPT,
            AbortReason::DeclinedDirectoryOverwrite,
        )
    } else {
        (REPLACE_FILE_PROMPT, AbortReason::DeclinedFileReplacement)
    };

    if prompter.confirm(prompt, true)? {
        Ok(Step::Continue(()))
    } else {
        Ok(Step::Abort(reason))
    }
}

fn invalid_choice(index: usize) -> dialoguer::Error {
    dialoguer::Error::IO(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("selection index {index} out of range"),
    ))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{
        AbortReason, Collected, InterruptFlag, OVERWRITE_DIRECTORY_PROMPT, REPLACE_FILE_PROMPT,
        TerminalPrompter, collect,
    };
    use crate::answers::{License, OptionalDependency};
    use crate::test_support::{Reply, ScriptedPrompter, full_script};

    #[test]
    fn collects_answers_in_order() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let mut prompter = ScriptedPrompter::new(full_script(vec![]));

        let Collected::Answers(answers) = collect(&mut prompter, dir.path()) else {
            panic!("expected answers");
        };

        assert_eq!(answers.project_name, "Demo");
        assert_eq!(answers.author, "alice");
        assert_eq!(answers.version, "2.0.0");
        assert_eq!(answers.description, "demo app");
        assert_eq!(answers.homepage, "");
        assert_eq!(answers.license, License::Mit);
        assert_eq!(
            answers.dependencies.into_iter().collect::<Vec<_>>(),
            vec![OptionalDependency::BootstrapIcons]
        );
        assert_eq!(
            prompter.asked,
            vec![
                "Project Name:",
                "Author:",
                "Version:",
                "Description:",
                "Homepage:",
                "License",
                "Dependencies"
            ]
        );
        assert_eq!(prompter.multi_defaults, vec![true, false, false]);
    }

    #[test]
    fn empty_input_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let mut prompter = ScriptedPrompter::new(vec![
            Reply::Text("   "),
            Reply::Text(""),
            Reply::Text(""),
            Reply::Text(""),
            Reply::Text(""),
            Reply::Select(4),
            Reply::Multi(vec![0]),
        ]);

        let Collected::Answers(answers) = collect(&mut prompter, dir.path()) else {
            panic!("expected answers");
        };

        assert_eq!(answers.project_name, "electron-vite-project");
        assert_eq!(answers.author, "anonymous");
        assert_eq!(answers.version, "1.0.0");
        assert_eq!(answers.description, "Electron-Vite application with Typescript");
        assert_eq!(answers.license, License::None);
        assert!(answers.wants(OptionalDependency::Sass));
    }

    #[test]
    fn existing_directory_asks_to_overwrite() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        fs::create_dir(dir.path().join("demo")).unwrap();
        let mut prompter = ScriptedPrompter::new(full_script(vec![Reply::Confirm(true)]));

        let collected = collect(&mut prompter, dir.path());

        assert!(matches!(collected, Collected::Answers(_)));
        assert_eq!(prompter.asked[1], OVERWRITE_DIRECTORY_PROMPT);
    }

    #[test]
    fn declining_directory_overwrite_aborts_cleanly() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let project = dir.path().join("demo");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("keep.txt"), "untouched").unwrap();
        let mut prompter = ScriptedPrompter::new(vec![Reply::Text("Demo"), Reply::Confirm(false)]);

        let collected = collect(&mut prompter, dir.path());

        assert_eq!(
            collected,
            Collected::Aborted(AbortReason::DeclinedDirectoryOverwrite)
        );
        assert_eq!(AbortReason::DeclinedDirectoryOverwrite.exit_code(), 0);
        assert_eq!(fs::read_to_string(project.join("keep.txt")).unwrap(), "untouched");
        assert_eq!(fs::read_dir(&project).unwrap().count(), 1);
    }

    #[test]
    fn declining_file_replacement_aborts_with_failure_code() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let file = dir.path().join("demo");
        fs::write(&file, "precious").unwrap();
        let mut prompter = ScriptedPrompter::new(vec![Reply::Text("Demo"), Reply::Confirm(false)]);

        let collected = collect(&mut prompter, dir.path());

        assert_eq!(
            collected,
            Collected::Aborted(AbortReason::DeclinedFileReplacement)
        );
        assert_eq!(prompter.asked[1], REPLACE_FILE_PROMPT);
        assert_eq!(AbortReason::DeclinedFileReplacement.exit_code(), 1);
        assert_eq!(fs::read_to_string(&file).unwrap(), "precious");
    }

    #[test]
    fn prompt_failure_maps_to_interrupted() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let mut prompter = ScriptedPrompter::new(vec![Reply::Text("Demo"), Reply::Fail]);

        let collected = collect(&mut prompter, dir.path());

        assert_eq!(collected, Collected::Aborted(AbortReason::Interrupted));
        assert_eq!(AbortReason::Interrupted.exit_code(), 0);
    }

    #[test]
    fn out_of_range_selection_aborts() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let mut replies = full_script(vec![]);
        replies[5] = Reply::Select(9);
        let mut prompter = ScriptedPrompter::new(replies);

        let collected = collect(&mut prompter, dir.path());

        assert_eq!(collected, Collected::Aborted(AbortReason::Interrupted));
    }

    #[test]
    fn raised_interrupt_aborts_before_touching_the_terminal() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let flag = InterruptFlag::default();
        flag.raise();
        let mut prompter = TerminalPrompter::new(flag);

        let collected = collect(&mut prompter, dir.path());

        assert_eq!(collected, Collected::Aborted(AbortReason::Interrupted));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn interrupt_during_a_prompt_discards_its_answer() {
        let flag = InterruptFlag::default();
        let prompter = TerminalPrompter::new(flag.clone());

        let result = prompter.guard(|_| {
            flag.raise();
            Ok("typed before ^C".to_string())
        });

        let err = result.expect_err("interrupt should win over the answer");
        assert!(err.to_string().contains("interrupted by Ctrl-C"));
    }

    #[test]
    fn guard_passes_answers_through_without_interrupt() {
        let prompter = TerminalPrompter::new(InterruptFlag::default());

        let value = prompter.guard(|_| Ok(3usize)).expect("no interrupt raised");

        assert_eq!(value, 3);
    }
}
