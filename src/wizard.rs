use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use spinoff::{spinners, Spinner};

use crate::batch::copy_extension;
use crate::destination::ensure_directory;
use crate::error::{Error, Result};
use crate::extension::Extension;
use crate::prompt::{absolute, read_existing_directory, DirectoryAnswer, Prompter};
use crate::report::{ExtensionStats, ExtensionSummary, Summary};
use crate::scan::count_by_extension;

#[derive(Debug, Clone)]
pub struct Options {
    /// Source folder given on the command line; asked for when absent or invalid.
    pub source: Option<PathBuf>,
    pub ask_on_overwrite: bool,
    /// No spinner.
    pub quiet: bool,
    /// Raised by the Ctrl+C handler; checked between stages, walk entries and files.
    pub interrupt: Arc<AtomicBool>,
}

/// How the wizard ended when nothing went wrong.
#[derive(Debug)]
pub enum Ending {
    Cancelled,
    NothingFound,
    Completed(Summary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stage {
    CollectSource,
    Count,
    CollectDestination(usize),
    Copy(usize),
    Summary,
}

struct Target {
    extension: Extension,
    found: usize,
    destination: Option<PathBuf>,
    stats: ExtensionStats,
}

pub struct Wizard<'p> {
    prompter: &'p mut dyn Prompter,
    options: Options,
    source: PathBuf,
    targets: Vec<Target>,
}

impl<'p> Wizard<'p> {
    pub fn new(prompter: &'p mut dyn Prompter, options: Options, extensions: &[Extension]) -> Self {
        let targets = extensions
            .iter()
            .map(|extension| Target {
                extension: extension.clone(),
                found: 0,
                destination: None,
                stats: ExtensionStats::default(),
            })
            .collect();
        Self {
            prompter,
            options,
            source: PathBuf::new(),
            targets,
        }
    }

    /// Drive the stages in order until the wizard ends. A Ctrl+C, whether inside a prompt
    /// or while walking and copying, comes back as [`Error::Interrupted`].
    pub fn run(mut self) -> Result<Ending> {
        let mut stage = Stage::CollectSource;
        loop {
            if self.options.interrupt.load(Ordering::SeqCst) {
                return Err(Error::Interrupted);
            }
            tracing::debug!(?stage, "entering stage");
            stage = match stage {
                Stage::CollectSource => {
                    if !self.collect_source()? {
                        crate::ui::cancelled();
                        return Ok(Ending::Cancelled);
                    }
                    Stage::Count
                }
                Stage::Count => {
                    self.count()?;
                    if self.targets.iter().all(|target| target.found == 0) {
                        crate::ui::nothing_found(&self.extensions());
                        return Ok(Ending::NothingFound);
                    }
                    self.after_counting()
                }
                Stage::CollectDestination(i) => {
                    self.collect_destination(i)?;
                    match self.next_with_files(i + 1) {
                        Some(next) => Stage::CollectDestination(next),
                        None => self.first_copy(),
                    }
                }
                Stage::Copy(i) => {
                    self.copy(i)?;
                    match self.next_with_files(i + 1) {
                        Some(next) => Stage::Copy(next),
                        None => Stage::Summary,
                    }
                }
                Stage::Summary => {
                    crate::ui::step(self.step_number(&Stage::Summary), "Final summary");
                    let summary = self.summary();
                    crate::ui::summary(&summary);
                    return Ok(Ending::Completed(summary));
                }
            };
        }
    }

    fn extensions(&self) -> Vec<Extension> {
        self.targets
            .iter()
            .map(|target| target.extension.clone())
            .collect()
    }

    /// Index of the first target at or after `from` that has files to copy.
    fn next_with_files(&self, from: usize) -> Option<usize> {
        (from..self.targets.len()).find(|&i| self.targets[i].found > 0)
    }

    fn after_counting(&self) -> Stage {
        match self.next_with_files(0) {
            Some(i) => Stage::CollectDestination(i),
            None => Stage::Summary,
        }
    }

    fn first_copy(&self) -> Stage {
        match self.next_with_files(0) {
            Some(i) => Stage::Copy(i),
            None => Stage::Summary,
        }
    }

    /// Steps are numbered as shown: targets without files get neither a destination nor a
    /// copy step.
    fn step_number(&self, stage: &Stage) -> usize {
        let with_files = |end: usize| self.targets[..end].iter().filter(|t| t.found > 0).count();
        let all = with_files(self.targets.len());
        match stage {
            Stage::CollectSource => 1,
            Stage::Count => 2,
            Stage::CollectDestination(i) => 3 + with_files(*i),
            Stage::Copy(i) => 3 + all + with_files(*i),
            Stage::Summary => 3 + 2 * all,
        }
    }

    /// False when the user typed a cancel keyword.
    fn collect_source(&mut self) -> Result<bool> {
        crate::ui::step(self.step_number(&Stage::CollectSource), "Source folder");
        if let Some(prefilled) = self.options.source.take() {
            if prefilled.is_dir() {
                self.source = absolute(&prefilled);
                crate::ui::source_selected(&self.source);
                return Ok(true);
            }
            crate::ui::prefilled_source_rejected(&prefilled);
        }
        match read_existing_directory(
            &mut *self.prompter,
            "SOURCE folder (where the files are):",
        )? {
            DirectoryAnswer::Existing(path) => {
                crate::ui::source_selected(&path);
                self.source = path;
                Ok(true)
            }
            DirectoryAnswer::Cancelled => Ok(false),
        }
    }

    fn count(&mut self) -> Result<()> {
        crate::ui::step(self.step_number(&Stage::Count), "Counting files");
        let extensions = self.extensions();
        let mut spinner = (!self.options.quiet).then(|| {
            Spinner::new(spinners::Dots, "Walking directories recursively...", None)
        });
        let counts = count_by_extension(&self.source, &extensions, &self.options.interrupt);
        let counts = match (counts, &mut spinner) {
            (Ok(counts), Some(spinner)) => {
                spinner.success(&format!("Done walking \"{}\"", self.source.display()));
                counts
            }
            (Err(err), Some(spinner)) => {
                spinner.fail(&format!("Stopped walking \"{}\"", self.source.display()));
                return Err(err);
            }
            (counts, None) => counts?,
        };
        for target in &mut self.targets {
            target.found = counts.get(&target.extension).copied().unwrap_or(0);
        }
        crate::ui::counts(&counts, &extensions);
        Ok(())
    }

    /// Ask until the destination exists or the user agrees to create it.
    fn collect_destination(&mut self, i: usize) -> Result<()> {
        let extension = self.targets[i].extension.clone();
        let upper = extension.suffix().to_uppercase();
        crate::ui::step(
            self.step_number(&Stage::CollectDestination(i)),
            &format!("Destination for {upper} files"),
        );
        let message = format!("DESTINATION folder for {upper} files:");
        let path = loop {
            let input = self.prompter.text(&message, None)?;
            let input = input.trim();
            if input.is_empty() {
                crate::ui::empty_destination();
                continue;
            }
            let path = absolute(std::path::Path::new(input));
            let status = ensure_directory(&mut *self.prompter, &path)?;
            crate::ui::directory_status(&path, &status);
            if status.is_ready() {
                break path;
            }
        };
        crate::ui::destination_selected(&extension, &path);
        self.targets[i].destination = Some(path);
        Ok(())
    }

    fn copy(&mut self, i: usize) -> Result<()> {
        let extensions = self.extensions();
        let target = &self.targets[i];
        let Some(destination) = target.destination.clone() else {
            return Ok(());
        };
        let extension = target.extension.clone();
        crate::ui::step(
            self.step_number(&Stage::Copy(i)),
            &format!("Copying {} files", extension.suffix().to_uppercase()),
        );
        let stats = copy_extension(
            &mut *self.prompter,
            &self.source,
            &destination,
            &extension,
            &extensions,
            self.options.ask_on_overwrite,
            &self.options.interrupt,
        )?;
        self.targets[i].stats = stats;
        Ok(())
    }

    fn summary(&self) -> Summary {
        Summary::new(
            self.source.clone(),
            self.targets
                .iter()
                .map(|target| ExtensionSummary {
                    extension: target.extension.suffix().to_owned(),
                    found: target.found,
                    destination: target.destination.clone(),
                    stats: target.stats,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::targets;
    use crate::testing::{Answer, ScriptedPrompter, TestDir};

    fn quiet(ask_on_overwrite: bool) -> Options {
        Options {
            source: None,
            ask_on_overwrite,
            quiet: true,
            interrupt: Arc::default(),
        }
    }

    #[test]
    fn cancel_at_source_ends_without_anything_else() {
        let mut prompter = ScriptedPrompter::new([Answer::text("sair")]);
        let ending = Wizard::new(&mut prompter, quiet(true), &targets())
            .run()
            .unwrap();
        assert!(matches!(ending, Ending::Cancelled));
        prompter.assert_done();
    }

    #[test]
    fn nothing_found_skips_destinations_and_copies() {
        let tmp = TestDir::new();
        tmp.write("notes/readme.txt", "x");
        let mut prompter = ScriptedPrompter::new([Answer::text(tmp.path().to_str().unwrap())]);
        let ending = Wizard::new(&mut prompter, quiet(true), &targets())
            .run()
            .unwrap();
        assert!(matches!(ending, Ending::NothingFound));
        assert_eq!(prompter.asked.len(), 1);
        prompter.assert_done();
    }

    #[test]
    fn full_run_copies_both_extensions() {
        let tmp = TestDir::new();
        tmp.write("src/a.lua", "a");
        tmp.write("src/x/b.LUA", "bb");
        tmp.write("src/x/y/c.manifest", "ccc");
        tmp.write("src/d.txt", "d");
        let lua_dest = tmp.path().join("out/lua");
        let manifest_dest = tmp.path().join("out/manifest");
        std::fs::create_dir_all(&manifest_dest).unwrap();

        let mut prompter = ScriptedPrompter::new([
            Answer::text(tmp.path().join("src").to_str().unwrap()),
            Answer::text(lua_dest.to_str().unwrap()),
            Answer::Confirm(true),
            Answer::text(manifest_dest.to_str().unwrap()),
        ]);
        let ending = Wizard::new(&mut prompter, quiet(true), &targets())
            .run()
            .unwrap();
        prompter.assert_done();

        let Ending::Completed(summary) = ending else {
            panic!("wizard did not complete");
        };
        assert_eq!(summary.extensions[0].extension, ".lua");
        assert_eq!(summary.extensions[0].found, 2);
        assert_eq!(summary.extensions[0].stats.copied, 2);
        assert_eq!(summary.extensions[1].stats.copied, 1);
        assert_eq!(summary.total.copied, 3);
        assert_eq!(summary.total.bytes_copied, 6);
        assert!(lua_dest.join("b.LUA").is_file());
        assert!(manifest_dest.join("c.manifest").is_file());
    }

    #[test]
    fn only_lua_files_means_no_manifest_destination() {
        let tmp = TestDir::new();
        tmp.write("src/a.lua", "a");
        let dest = tmp.path().join("dest");
        std::fs::create_dir_all(&dest).unwrap();
        let mut prompter = ScriptedPrompter::new([
            Answer::text(tmp.path().join("src").to_str().unwrap()),
            Answer::text(dest.to_str().unwrap()),
        ]);
        let ending = Wizard::new(&mut prompter, quiet(true), &targets())
            .run()
            .unwrap();
        prompter.assert_done();
        let Ending::Completed(summary) = ending else {
            panic!("wizard did not complete");
        };
        assert_eq!(summary.extensions[1].destination, None);
        assert_eq!(summary.extensions[1].stats, ExtensionStats::default());
    }

    #[test]
    fn destination_is_asked_again_after_declining_creation() {
        let tmp = TestDir::new();
        tmp.write("src/a.manifest", "a");
        let declined = tmp.path().join("nope");
        let dest = tmp.path().join("dest");
        std::fs::create_dir_all(&dest).unwrap();
        let mut prompter = ScriptedPrompter::new([
            Answer::text(tmp.path().join("src").to_str().unwrap()),
            Answer::text("   "),
            Answer::text(declined.to_str().unwrap()),
            Answer::Confirm(false),
            Answer::text(dest.to_str().unwrap()),
        ]);
        let ending = Wizard::new(&mut prompter, quiet(true), &targets())
            .run()
            .unwrap();
        prompter.assert_done();
        assert!(matches!(ending, Ending::Completed(_)));
        assert!(!declined.exists());
        assert!(dest.join("a.manifest").is_file());
    }

    #[test]
    fn prefilled_source_and_overwrite_without_asking() {
        let tmp = TestDir::new();
        let src = tmp.path().join("src");
        tmp.write("src/a.lua", "new");
        tmp.write("dest/a.lua", "old");
        let dest = tmp.path().join("dest");
        let options = Options {
            source: Some(src),
            ask_on_overwrite: false,
            quiet: true,
            interrupt: Arc::default(),
        };
        let mut prompter = ScriptedPrompter::new([Answer::text(dest.to_str().unwrap())]);
        let ending = Wizard::new(&mut prompter, options, &targets()).run().unwrap();
        prompter.assert_done();
        assert!(matches!(ending, Ending::Completed(_)));
        assert_eq!(std::fs::read_to_string(dest.join("a.lua")).unwrap(), "new");
    }

    #[test]
    fn interrupt_while_asking_destination_propagates() {
        let tmp = TestDir::new();
        tmp.write("src/a.lua", "a");
        let mut prompter = ScriptedPrompter::new([
            Answer::text(tmp.path().join("src").to_str().unwrap()),
            Answer::Interrupt,
        ]);
        let res = Wizard::new(&mut prompter, quiet(true), &targets()).run();
        assert!(matches!(res, Err(Error::Interrupted)));
    }

    #[test]
    fn raised_interrupt_stops_before_the_first_prompt() {
        let options = quiet(true);
        options.interrupt.store(true, Ordering::SeqCst);
        let mut prompter = ScriptedPrompter::default();
        let res = Wizard::new(&mut prompter, options, &targets()).run();
        assert!(matches!(res, Err(Error::Interrupted)));
        prompter.assert_done();
    }

    #[test]
    fn steps_are_numbered_over_targets_with_files() {
        let mut prompter = ScriptedPrompter::default();
        let mut wizard = Wizard::new(&mut prompter, quiet(true), &targets());
        wizard.targets[0].found = 0;
        wizard.targets[1].found = 4;
        assert_eq!(wizard.step_number(&Stage::Count), 2);
        assert_eq!(wizard.step_number(&Stage::CollectDestination(1)), 3);
        assert_eq!(wizard.step_number(&Stage::Copy(1)), 4);
        assert_eq!(wizard.step_number(&Stage::Summary), 5);

        wizard.targets[0].found = 2;
        assert_eq!(wizard.step_number(&Stage::CollectDestination(0)), 3);
        assert_eq!(wizard.step_number(&Stage::CollectDestination(1)), 4);
        assert_eq!(wizard.step_number(&Stage::Copy(0)), 5);
        assert_eq!(wizard.step_number(&Stage::Copy(1)), 6);
        assert_eq!(wizard.step_number(&Stage::Summary), 7);
    }
}
