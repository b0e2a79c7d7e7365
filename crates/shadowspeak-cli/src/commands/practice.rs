use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;

use anyhow::{Result, bail};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use shadowspeak_core::practice::{NoCapture, Rehearsal, Speaker};
use shadowspeak_core::script::{ScriptRepository, relative_time_label};
use shadowspeak_core::sentence::{SentenceEditor, SentenceUnit};
use shadowspeak_core::session::{SaveOutcome, SessionManager};

use super::AppContext;
use super::scripts::rejection_message;
use super::utils::{parse_position, read_text};
use crate::speaker;

const COMMANDS: &[&str] = &[
    "next", "prev", "go", "speak", "stop", "list", "merge", "split", "edit", "sheet", "apply",
    "cancel", "save", "scripts", "load", "delete", "help", "quit",
];

/// Rustyline helper with command completion, hints and highlighting.
#[derive(Clone)]
struct PracticeHelper {
    commands: Vec<String>,
}

impl PracticeHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for PracticeHelper {}

impl Completer for PracticeHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for PracticeHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let word = line.split(' ').next().unwrap_or("");
        if !word.is_empty() && self.commands.iter().any(|cmd| cmd == word) {
            Owned(format!("{}{}", word.bright_cyan(), &line[word.len()..]))
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for PracticeHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for PracticeHelper {}

/// One line of practice input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Next,
    Prev,
    Go(String),
    Speak,
    Stop,
    List,
    Merge(Option<String>),
    Split(Option<String>),
    /// `edit <text>` in practice, `edit <n> <text>` in the editor sheet
    Edit(String),
    Sheet,
    Apply,
    Cancel,
    Save(Option<String>),
    Scripts,
    Load(String),
    Delete(String),
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        match (word, arg) {
            ("" | "n" | "next", None) => Command::Next,
            ("p" | "prev", None) => Command::Prev,
            ("go", Some(arg)) => Command::Go(arg),
            ("s" | "speak", None) => Command::Speak,
            ("stop", None) => Command::Stop,
            ("l" | "list", None) => Command::List,
            ("merge", arg) => Command::Merge(arg),
            ("split", arg) => Command::Split(arg),
            ("edit", Some(arg)) => Command::Edit(arg),
            ("sheet", None) => Command::Sheet,
            ("apply", None) => Command::Apply,
            ("cancel", None) => Command::Cancel,
            ("save", arg) => Command::Save(arg),
            ("scripts", None) => Command::Scripts,
            ("load", Some(arg)) => Command::Load(arg),
            ("delete", Some(arg)) => Command::Delete(arg),
            ("h" | "help" | "?", None) => Command::Help,
            ("q" | "quit" | "exit", None) => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

/// A practice session: the editing session, the rehearsal position and an
/// optional editor sheet draft.
struct Practice<R: ScriptRepository, S: Speaker> {
    manager: SessionManager<R>,
    rehearsal: Rehearsal<S, NoCapture>,
    draft: Option<SentenceEditor>,
}

impl<R: ScriptRepository, S: Speaker> Practice<R, S> {
    fn new(manager: SessionManager<R>, speaker: S) -> Self {
        let len = manager.units().len();
        Self {
            manager,
            rehearsal: Rehearsal::new(len, speaker, NoCapture),
            draft: None,
        }
    }

    /// Units the next edit applies to: the draft while the sheet is open.
    fn visible_units(&self) -> &[SentenceUnit] {
        match &self.draft {
            Some(draft) => draft.items(),
            None => self.manager.units(),
        }
    }

    fn handle(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Next => {
                if self.rehearsal.next() {
                    self.show_current();
                } else {
                    println!("{}", "Already at the last sentence.".bright_black());
                }
            }
            Command::Prev => {
                if self.rehearsal.prev() {
                    self.show_current();
                } else {
                    println!("{}", "Already at the first sentence.".bright_black());
                }
            }
            Command::Go(arg) => match parse_position(&arg, self.rehearsal.cursor().len()) {
                Some(position) => {
                    self.rehearsal.jump(position);
                    self.show_current();
                }
                None => println!("{}", format!("No sentence {}", arg).yellow()),
            },
            Command::Speak => self.rehearsal.speak_current(&self.manager.sentences())?,
            Command::Stop => self.rehearsal.stop(),
            Command::List => self.show_list(),
            Command::Merge(arg) => self.edit_structure(arg, true),
            Command::Split(arg) => self.edit_structure(arg, false),
            Command::Edit(arg) => self.edit_text(&arg),
            Command::Sheet => {
                if self.draft.is_some() {
                    println!("{}", "The editor sheet is already open.".bright_black());
                } else {
                    self.draft = Some(SentenceEditor::new(self.manager.units()));
                    println!(
                        "{}",
                        "Editing a draft. 'apply' keeps the changes, 'cancel' drops them."
                            .bright_yellow()
                    );
                    self.show_list();
                }
            }
            Command::Apply => match self.draft.take() {
                Some(draft) => {
                    self.manager.replace_units(draft.apply());
                    self.rehearsal.resize(self.manager.units().len());
                    println!("{}", "Changes applied.".green());
                    self.show_current();
                }
                None => println!("{}", "The editor sheet is not open.".bright_black()),
            },
            Command::Cancel => {
                if self.draft.take().is_some() {
                    println!("{}", "Changes discarded.".bright_black());
                } else {
                    println!("{}", "The editor sheet is not open.".bright_black());
                }
            }
            Command::Save(name) => self.save(name)?,
            Command::Scripts => self.show_scripts(),
            Command::Load(id) => {
                if self.draft.is_some() {
                    println!("{}", "Apply or cancel the editor sheet first.".yellow());
                } else {
                    self.manager.load(&id)?;
                    self.rehearsal.resize(self.manager.units().len());
                    self.rehearsal.jump(0);
                    println!("{}", format!("Loaded {}", id).green());
                    self.show_current();
                }
            }
            Command::Delete(id) => {
                if self.manager.delete(&id)? {
                    println!("{}", format!("Deleted {}", id).green());
                } else {
                    println!("{}", format!("No saved script with id '{}'", id).yellow());
                }
            }
            Command::Help => print_help(),
            Command::Quit => {
                self.rehearsal.stop();
                return Ok(Flow::Quit);
            }
            Command::Unknown(line) => {
                println!("{}", format!("Unknown command: {}", line).bright_black());
            }
        }
        Ok(Flow::Continue)
    }

    fn edit_structure(&mut self, arg: Option<String>, merge: bool) {
        let len = self.visible_units().len();
        let index = match arg {
            Some(arg) => parse_position(&arg, len),
            None => Some(self.rehearsal.cursor().position()),
        };
        let Some(index) = index else {
            println!("{}", "No such sentence.".yellow());
            return;
        };

        let changed = match (&mut self.draft, merge) {
            (Some(draft), true) => draft.merge(index),
            (Some(draft), false) => draft.split(index),
            (None, true) => self.manager.merge(index),
            (None, false) => self.manager.split(index),
        };

        if !changed {
            let reason = if merge {
                "Nothing to merge with."
            } else {
                "Nothing to split."
            };
            println!("{}", reason.bright_black());
            return;
        }

        if self.draft.is_some() {
            self.show_list();
        } else {
            self.rehearsal.resize(self.manager.units().len());
            self.show_current();
        }
    }

    fn edit_text(&mut self, arg: &str) {
        let changed = match &mut self.draft {
            Some(draft) => {
                let Some((number, text)) = arg.split_once(char::is_whitespace) else {
                    println!("{}", "Usage: edit <n> <text>".yellow());
                    return;
                };
                match parse_position(number, draft.items().len()) {
                    Some(index) => draft.edit_text(index, text),
                    None => false,
                }
            }
            None => {
                let index = self.rehearsal.cursor().position();
                self.manager.edit_sentence(index, arg)
            }
        };

        if !changed {
            println!("{}", "Nothing changed.".bright_black());
        } else if self.draft.is_some() {
            self.show_list();
        } else {
            self.show_current();
        }
    }

    fn save(&mut self, name: Option<String>) -> Result<()> {
        if self.draft.is_some() {
            println!("{}", "Apply or cancel the editor sheet first.".yellow());
            return Ok(());
        }

        if self.manager.binding().is_bound() && name.is_none() {
            if self.manager.update_bound()? {
                println!("{}", "Script updated.".green());
            } else {
                println!("{}", "The saved script no longer exists.".yellow());
            }
            return Ok(());
        }

        let Some(name) = name else {
            println!("{}", "Usage: save <name>".yellow());
            return Ok(());
        };
        match self.manager.save_as(&name)? {
            SaveOutcome::Saved(script) => {
                println!("{} {}", "Saved".green(), script.name.bold());
                println!("{}", script.id.bright_black());
            }
            SaveOutcome::Rejected(reason) => println!("{}", rejection_message(reason).yellow()),
        }
        Ok(())
    }

    fn show_current(&self) {
        let cursor = self.rehearsal.cursor();
        let Some(unit) = self.manager.units().get(cursor.position()) else {
            println!("{}", "No sentences.".bright_black());
            return;
        };
        println!(
            "{} {}",
            format!(
                "[{}/{} {:>3.0}%]",
                cursor.position() + 1,
                cursor.len(),
                cursor.progress() * 100.0
            )
            .bright_black(),
            unit.text.bold()
        );
    }

    fn show_list(&self) {
        let current = self.rehearsal.cursor().position();
        let in_sheet = self.draft.is_some();
        for (i, unit) in self.visible_units().iter().enumerate() {
            let number = format!("{:>3}.", i + 1);
            if !in_sheet && i == current {
                println!("{} {}", number.bright_green(), unit.text.bold());
            } else {
                println!("{} {}", number.bright_black(), unit.text);
            }
        }
    }

    fn show_scripts(&self) {
        let scripts = self.manager.scripts();
        if scripts.is_empty() {
            println!("{}", "No saved scripts yet.".bright_black());
            return;
        }
        let now = chrono::Utc::now().timestamp_millis();
        for script in scripts {
            let marker = if self.manager.binding().is_bound_to(&script.id) {
                "*".bright_green().to_string()
            } else {
                " ".to_string()
            };
            println!(
                "{} {} {} {}",
                marker,
                script.name.bold(),
                format!("({} sentences, {})", script.sentences.len(), relative_time_label(script.updated_at, now))
                    .bright_black(),
                script.id.bright_black()
            );
        }
        println!(
            "{}",
            format!("{}/{} scripts saved", scripts.len(), self.manager.max_scripts()).bright_black()
        );
    }
}

fn print_help() {
    let lines = [
        ("next, prev, go <n>", "move between sentences"),
        ("speak, stop", "play or stop the current sentence"),
        ("list", "show all sentences"),
        ("merge [n], split [n]", "merge with the next sentence, or split back"),
        ("edit <text>", "replace the current sentence"),
        ("sheet, apply, cancel", "edit a draft, then keep or drop it"),
        ("save [name]", "update the loaded script, or save a new one"),
        ("scripts, load <id>, delete <id>", "manage saved scripts"),
        ("quit", "leave practice"),
    ];
    for (command, description) in lines {
        println!("  {:<34} {}", command.bright_cyan(), description.bright_black());
    }
}

/// Runs the interactive practice loop over a text file or a saved script.
pub fn run(context: &AppContext, file: Option<PathBuf>, script: Option<String>) -> Result<()> {
    let mut manager = context.open_manager();
    match script {
        Some(id) => manager.load(&id)?,
        None => {
            let text = read_text(file)?;
            if manager.start(&text) == 0 {
                bail!("No sentences found in the input");
            }
        }
    }

    let mut practice = Practice::new(manager, speaker::from_settings(&context.config.speech));

    let mut rl = Editor::new()?;
    rl.set_helper(Some(PracticeHelper::new()));

    println!("{}", "=== ShadowSpeak ===".bright_magenta().bold());
    println!(
        "{}",
        "Press Enter for the next sentence, 'help' for commands, 'quit' to exit.".bright_black()
    );
    println!();
    practice.show_current();

    loop {
        let prompt = if practice.draft.is_some() { "sheet> " } else { ">> " };
        match rl.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(&line);
                }
                match practice.handle(Command::parse(&line)) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                practice.rehearsal.stop();
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                practice.rehearsal.stop();
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadowspeak_core::practice::SilentSpeaker;
    use shadowspeak_core::script::{InMemoryScriptRepository, SavedScript};
    use shadowspeak_core::sentence::is_partition;

    fn practice(text: &str) -> Practice<InMemoryScriptRepository, SilentSpeaker> {
        let mut manager = SessionManager::with_repository(InMemoryScriptRepository::new());
        manager.start(text);
        Practice::new(manager, SilentSpeaker)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(""), Command::Next);
        assert_eq!(Command::parse("  prev "), Command::Prev);
        assert_eq!(Command::parse("merge"), Command::Merge(None));
        assert_eq!(Command::parse("split 2"), Command::Split(Some("2".to_string())));
        assert_eq!(
            Command::parse("edit Hello there."),
            Command::Edit("Hello there.".to_string())
        );
        assert_eq!(Command::parse("save"), Command::Save(None));
        assert_eq!(
            Command::parse("save My talk"),
            Command::Save(Some("My talk".to_string()))
        );
        assert_eq!(Command::parse("load"), Command::Unknown("load".to_string()));
        assert_eq!(Command::parse("dance"), Command::Unknown("dance".to_string()));
    }

    #[test]
    fn test_merge_follows_cursor() {
        let mut practice = practice("One. Two. Three.");
        practice.handle(Command::Next).unwrap();
        practice.handle(Command::Next).unwrap();
        assert_eq!(practice.rehearsal.cursor().position(), 2);

        practice.handle(Command::Merge(Some("2".to_string()))).unwrap();
        assert_eq!(practice.manager.units().len(), 2);
        assert_eq!(practice.rehearsal.cursor().len(), 2);
        assert_eq!(practice.rehearsal.cursor().position(), 1);
    }

    #[test]
    fn test_sheet_cancel_leaves_session_alone() {
        let mut practice = practice("One. Two. Three.");
        practice.handle(Command::Sheet).unwrap();
        practice.handle(Command::Merge(Some("1".to_string()))).unwrap();
        assert_eq!(practice.visible_units().len(), 2);
        assert_eq!(practice.manager.units().len(), 3);

        practice.handle(Command::Cancel).unwrap();
        assert!(practice.draft.is_none());
        assert_eq!(practice.manager.units().len(), 3);
    }

    #[test]
    fn test_sheet_apply_commits_draft() {
        let mut practice = practice("One. Two. Three.");
        practice.handle(Command::Sheet).unwrap();
        practice.handle(Command::Merge(Some("1".to_string()))).unwrap();
        practice
            .handle(Command::Edit("2 Three!".to_string()))
            .unwrap();
        practice.handle(Command::Apply).unwrap();

        let texts = practice.manager.sentences();
        assert_eq!(texts, vec!["One. Two.", "Three!"]);
        assert_eq!(practice.rehearsal.cursor().len(), 2);
    }

    #[test]
    fn test_save_then_update_bound_script() {
        let mut practice = practice("One. Two.");
        practice.handle(Command::Save(Some("Talk".to_string()))).unwrap();
        assert!(practice.manager.binding().is_bound());
        assert_eq!(practice.manager.scripts().len(), 1);

        practice.handle(Command::Merge(None)).unwrap();
        practice.handle(Command::Save(None)).unwrap();

        assert_eq!(practice.manager.scripts().len(), 1);
        assert_eq!(practice.manager.scripts()[0].sentences.len(), 1);
    }

    #[test]
    fn test_edit_current_sentence() {
        let mut practice = practice("One. Two.");
        practice.handle(Command::Next).unwrap();
        practice.handle(Command::Edit("Deux.".to_string())).unwrap();
        assert_eq!(practice.manager.sentences(), vec!["One.", "Deux."]);
    }

    #[test]
    fn test_sheet_apply_on_legacy_script() {
        let legacy = SavedScript {
            id: "script-legacy".to_string(),
            name: "Legacy".to_string(),
            sentences: vec![
                SentenceUnit::original(0, "One."),
                SentenceUnit::original(0, "Two."),
            ],
            created_at: 0,
            updated_at: 0,
        };
        let manager =
            SessionManager::with_repository(InMemoryScriptRepository::with_scripts(vec![legacy]));
        let mut practice = Practice::new(manager, SilentSpeaker);

        practice.handle(Command::Load("script-legacy".to_string())).unwrap();
        practice.handle(Command::Sheet).unwrap();
        practice.handle(Command::Apply).unwrap();

        assert!(is_partition(practice.manager.units()));
        assert_eq!(practice.rehearsal.cursor().len(), 2);
    }

    #[test]
    fn test_quit_stops() {
        let mut practice = practice("One.");
        assert!(matches!(practice.handle(Command::Quit).unwrap(), Flow::Quit));
    }
}
