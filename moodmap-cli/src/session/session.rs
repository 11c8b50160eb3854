use super::command::{Command, HELP, parse_line};
use crate::common::{create_editor_buffer, resolve_editor};
use crate::render::Renderer;
use anyhow::{Context, Result, anyhow, bail};
use moodmap_core::{Controller, Draft, RecordingMap, filter::parse_lower_bound, prompts::any_prompt};
use std::{
    fs,
    io::{self, BufRead, IsTerminal, Write},
    path::Path,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Drives a [`Controller`] from text commands, printing results as it goes.
pub struct Session {
    controller: Controller<RecordingMap>,
    renderer: Renderer,
    /// Raw "from"/"to" inputs; both are re-parsed whenever either changes.
    from: String,
    to: String,
}

impl Session {
    pub fn new(controller: Controller<RecordingMap>, renderer: Renderer) -> Self {
        Self {
            controller,
            renderer,
            from: String::new(),
            to: String::new(),
        }
    }

    #[cfg(test)]
    pub fn controller(&self) -> &Controller<RecordingMap> {
        &self.controller
    }

    fn draft_mut(&mut self) -> Result<&mut Draft> {
        self.controller
            .draft_mut()
            .ok_or_else(|| anyhow!("no entry is open; click on the map or open an entry first"))
    }

    fn set_date_inputs(&mut self, from: String, to: String) -> Result<()> {
        self.controller.set_date_inputs(&from, &to)?;
        self.from = from;
        self.to = to;
        Ok(())
    }

    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Click(location) => {
                self.controller.map_clicked(location);
                self.renderer.print_state(self.controller.state());
            }
            Command::Open(id) => {
                self.controller.marker_activated(id)?;
                self.renderer.print_state(self.controller.state());
            }
            Command::Tap(handle) => match self.controller.marker_clicked(handle)? {
                Some(_) => self.renderer.print_state(self.controller.state()),
                None => self
                    .renderer
                    .print_info(&format!("Marker #{} is not an entry", handle.0)),
            },
            Command::Title(title) => self.draft_mut()?.title = title,
            Command::Mood(mood) => self.draft_mut()?.mood = Some(mood),
            Command::Date(input) => {
                let date = parse_lower_bound(&input)?;
                self.draft_mut()?.date = date;
            }
            Command::Desc(Some(text)) => self.draft_mut()?.description = text,
            Command::Desc(None) => {
                let editor = resolve_editor(&self.controller.config().editor);
                let initial = self.draft_mut()?.description.clone();
                let text = create_editor_buffer(&editor, &initial)
                    .with_context(|| format!("running editor '{editor}'"))?;
                self.draft_mut()?.description = text.trim_end().to_string();
            }
            Command::Template(Some(id)) => self.draft_mut()?.use_template(&id)?,
            Command::Template(None) => self.draft_mut()?.clear_template(),
            Command::Answer { label, text } => {
                let Some(answers) = self.draft_mut()?.template.as_mut() else {
                    bail!("no template selected; use 'template ID' first");
                };
                answers.set(&label, text)?;
            }
            Command::Submit => {
                let editing = self.controller.editing().is_some();
                let id = self.controller.submit()?;
                let verb = if editing { "Updated" } else { "Saved" };
                self.renderer.print_info(&format!("{verb} entry {id}"));
            }
            Command::Cancel => {
                if self.controller.cancel() {
                    self.renderer.print_info("Discarded the open entry");
                }
            }
            Command::Delete(id) => {
                let entry = self.controller.delete_requested(id)?;
                self.renderer
                    .print_info(&format!("Deleted entry '{}'", entry.title));
            }
            Command::Search(text) => self.controller.set_search(text),
            Command::FilterMood(mood) => self.controller.set_mood_filter(mood),
            Command::From(from) => {
                let to = self.to.clone();
                self.set_date_inputs(from, to)?;
            }
            Command::To(to) => {
                let from = self.from.clone();
                self.set_date_inputs(from, to)?;
            }
            Command::List => self.renderer.print_entries(
                &self.controller.visible_entries(),
                self.controller.editing(),
                self.controller.filter().is_active(),
            ),
            Command::Markers => self
                .renderer
                .print_markers(self.controller.map(), self.controller.markers()),
            Command::Show => self.renderer.print_state(self.controller.state()),
            Command::Prompt => self.renderer.print_prompt(any_prompt()),
            Command::Templates => self.renderer.print_templates(),
            Command::Moods => self.renderer.print_moods(),
            Command::Help => self.renderer.print_md(HELP),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    pub fn run_line(&mut self, line: &str) -> Result<Flow> {
        match parse_line(line)? {
            Some(command) => self.execute(command),
            None => Ok(Flow::Continue),
        }
    }

    /// Replays a command file. Failing lines are reported and skipped, unless
    /// `strict`, in which case the first failure ends the run.
    pub fn run_script(&mut self, path: &Path, strict: bool) -> Result<()> {
        let script =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        for (n, line) in script.lines().enumerate() {
            match self.run_line(line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) if strict => return Err(e.context(format!("line {}", n + 1))),
                Err(e) => self.renderer.print_error(&format!("line {}: {e}", n + 1)),
            }
        }
        Ok(())
    }

    pub fn run_interactive(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let prompt = stdin.is_terminal();
        if prompt {
            self.renderer.print_info("Type 'help' for the list of commands.");
        }
        let mut lines = stdin.lock().lines();
        loop {
            if prompt {
                print!("{}> ", self.controller.state().name());
                io::stdout().flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            match self.run_line(&line?) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => self.renderer.print_error(&e.to_string()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderOptions;
    use moodmap_core::{Config, EntryKind, MarkerKind, Mood, View};

    fn session() -> Session {
        let config = Config::default();
        let map = RecordingMap::new(View {
            center: config.center,
            zoom: config.zoom,
        });
        let renderer = Renderer::new(Some(RenderOptions {
            date_format: config.date_format.clone(),
            use_color: false,
            short_mode: true,
        }));
        Session::new(Controller::new(config, map), renderer)
    }

    fn run(session: &mut Session, lines: &[&str]) {
        for line in lines {
            session.run_line(line).unwrap();
        }
    }

    #[test]
    fn compose_and_submit_from_commands() {
        let mut s = session();
        run(
            &mut s,
            &[
                "click -122.2585 37.8719",
                "title \"Morning walk\"",
                "mood calmness",
                "date 2024-03-10",
                "desc Fog over the bay",
                "submit",
            ],
        );
        let c = s.controller();
        assert!(c.state().is_idle());
        assert_eq!(c.entries().len(), 1);
        let entry = &c.entries()[0];
        assert_eq!(entry.title, "Morning walk");
        assert_eq!(entry.mood, Mood::Calmness);
        assert_eq!(entry.description, "Fog over the bay");
        assert_eq!(entry.date.format("%Y-%m-%d").to_string(), "2024-03-10");
        assert_eq!(c.map().marker_count(), 1);
    }

    #[test]
    fn editing_commands_need_an_open_entry() {
        let mut s = session();
        let err = s.run_line("title Orphan").unwrap_err();
        assert!(err.to_string().contains("no entry is open"));
        assert!(s.run_line("answer \"Goal\" x").is_err());
    }

    #[test]
    fn failed_submit_keeps_the_draft() {
        let mut s = session();
        run(&mut s, &["click 0 0", "title Untitled mood"]);
        assert!(s.run_line("submit").is_err());
        assert!(s.controller().draft().is_some());
        assert_eq!(s.controller().entries().len(), 0);
    }

    #[test]
    fn templated_entry_and_tap_to_edit() {
        let mut s = session();
        run(
            &mut s,
            &[
                "click 2.35 48.85",
                "title Thanks",
                "mood warmth",
                "template gratitude",
                "answer \"Gratitude level\" 9",
                "submit",
            ],
        );
        let entry = s.controller().entries()[0].clone();
        assert!(matches!(entry.kind, EntryKind::Templated(_)));
        assert_eq!(entry.template_id(), Some("gratitude"));

        let (handle, _) = s
            .controller()
            .map()
            .markers()
            .find(|(_, m)| m.style.kind == MarkerKind::Entry(entry.id))
            .unwrap();
        s.run_line(&format!("tap {}", handle.0)).unwrap();
        assert_eq!(s.controller().editing(), Some(entry.id));
        run(&mut s, &["title \"Thanks again\"", "submit"]);
        assert_eq!(s.controller().entries()[0].title, "Thanks again");
        assert_eq!(s.controller().entries().len(), 1);
    }

    #[test]
    fn date_inputs_are_kept_between_commands() {
        let mut s = session();
        run(
            &mut s,
            &[
                "click 0 0",
                "title Old",
                "mood sadness",
                "date 2023-01-05",
                "submit",
                "click 1 1",
                "title New",
                "mood energy",
                "date 2024-06-01",
                "submit",
                "from 2024-01-01",
            ],
        );
        assert_eq!(s.controller().visible_entries().len(), 1);
        s.run_line("to 2024-05-31").unwrap();
        assert_eq!(s.controller().visible_entries().len(), 0);
        assert!(s.run_line("to someday").is_err());
        assert_eq!(s.to, "2024-05-31");
        run(&mut s, &["from", "to"]);
        assert_eq!(s.controller().visible_entries().len(), 2);
        assert_eq!(s.controller().map().marker_count(), 2);
    }

    #[test]
    fn script_reports_errors_and_continues_unless_strict() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# demo").unwrap();
        writeln!(file, "click 0 0").unwrap();
        writeln!(file, "fly away").unwrap();
        writeln!(file, "title Still here").unwrap();
        writeln!(file, "mood happiness").unwrap();
        writeln!(file, "submit").unwrap();
        writeln!(file, "quit").unwrap();
        writeln!(file, "click 5 5").unwrap();

        let mut s = session();
        s.run_script(file.path(), false).unwrap();
        assert_eq!(s.controller().entries().len(), 1);
        assert!(s.controller().state().is_idle());

        let mut strict = session();
        let err = strict.run_script(file.path(), true).unwrap_err();
        assert!(format!("{err:#}").contains("line 3"));
        assert_eq!(strict.controller().entries().len(), 0);
    }

    #[test]
    fn delete_removes_entry_and_marker() {
        let mut s = session();
        run(&mut s, &["click 0 0", "title Gone", "mood anger", "submit"]);
        let id = s.controller().entries()[0].id;
        s.run_line(&format!("delete {id}")).unwrap();
        assert!(s.controller().entries().is_empty());
        assert_eq!(s.controller().map().marker_count(), 0);
        assert!(s.run_line(&format!("delete {id}")).is_err());
    }
}
