use super::theme::{OneDark, mood_badge, terminal_color};
use moodmap_core::{
    Draft, EntryId, Interaction, JournalEntry, JournalTemplate, MarkerKind, MarkerRegistry, Mood,
    RecordingMap,
    render::{format_date, format_entry_block, format_entry_line},
};
use termimad::{MadSkin, crossterm::style::Stylize};

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
    pub short_mode: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: OneDark::skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    date_format: "%a, %d %b %Y %H:%M".to_string(),
                    use_color: true,
                    short_mode: false,
                },
            },
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            print!("{md}");
            if !md.ends_with('\n') {
                println!();
            }
        }
    }

    pub fn print_info(&self, message: &str) {
        let md = format!("|-|\n| {message} |\n|-|\n");
        if self.opts.use_color {
            self.print_md(&md);
        } else {
            println!("{}", message);
        }
    }

    pub fn print_error(&self, message: &str) {
        if self.opts.use_color {
            eprintln!("{}", message.to_string().with(OneDark::RED));
        } else {
            eprintln!("error: {message}");
        }
    }

    fn badge(&self, mood: Mood) -> String {
        if self.opts.use_color {
            let (fg, bg) = mood_badge(mood);
            format!("{}", format!(" {mood} ").with(fg).on(bg))
        } else {
            format!("[{mood}]")
        }
    }

    pub fn print_entry_line(&self, entry: &JournalEntry, editing: bool) {
        let marker = if editing { "*" } else { " " };
        if !self.opts.use_color {
            println!("{marker} {:>14}  {}", entry.id, format_entry_line(entry, &self.opts.date_format));
            return;
        }
        let id = entry.id.to_string().with(OneDark::COMMENT);
        let date = format_date(entry.date, &self.opts.date_format).with(OneDark::CYAN);
        let title = entry.title.clone().with(OneDark::YELLOW);
        println!("{marker} {id:>14}  {date} {} {title}", self.badge(entry.mood));
    }

    /// The "Recent Entries" panel.
    pub fn print_entries(&self, entries: &[&JournalEntry], editing: Option<EntryId>, filtered: bool) {
        if entries.is_empty() {
            if filtered {
                self.print_info("No entries match the current filters");
            } else {
                self.print_info("No entries found");
            }
            return;
        }
        for (i, entry) in entries.iter().enumerate() {
            let is_editing = editing == Some(entry.id);
            if self.opts.short_mode {
                self.print_entry_line(entry, is_editing);
                continue;
            }
            self.print_entry_line(entry, is_editing);
            self.print_md(&format_entry_block(entry, &self.opts.date_format));
            if i + 1 < entries.len() {
                self.print_md("---");
            }
        }
    }

    pub fn print_markers(&self, map: &RecordingMap, registry: &MarkerRegistry) {
        if map.marker_count() == 0 {
            self.print_info("No markers on the map");
        }
        for (handle, marker) in map.markers() {
            let what = match marker.style.kind {
                MarkerKind::Entry(id) => format!("entry {id}"),
                MarkerKind::Pending => "pending".to_string(),
            };
            let swatch = if self.opts.use_color {
                format!("{}", "●".to_string().with(terminal_color(marker.style.color)))
            } else {
                marker.style.color.hex()
            };
            let tracked = match marker.style.kind {
                MarkerKind::Entry(id) => registry.handle_for(id) == Some(handle),
                MarkerKind::Pending => registry.pending().map(|(h, _)| h) == Some(handle),
            };
            let stale = if tracked { "" } else { " (untracked)" };
            println!(
                "#{:<4} {swatch} {:<24} {} opacity {:.1}{stale}",
                handle.0, what, marker.at, marker.style.opacity
            );
        }
        let view = map.view();
        println!("view: {} @ zoom {}", view.center, view.zoom);
    }

    pub fn print_state(&self, state: &Interaction) {
        match state {
            Interaction::Idle => self.print_info("Click on the map to create a new entry."),
            Interaction::Composing { location, draft } => {
                self.print_md(&format!("# Add New Entry at {location}"));
                self.print_draft(draft);
            }
            Interaction::Editing { id, draft } => {
                self.print_md(&format!("# Edit Entry {id}"));
                self.print_draft(draft);
            }
        }
    }

    fn print_draft(&self, draft: &Draft) {
        let mut md = String::new();
        md.push_str(&format!("* **Title:** {}\n", draft.title));
        md.push_str(&format!(
            "* **Mood:** {}\n",
            draft.mood.map_or("-".to_string(), |m| m.to_string())
        ));
        md.push_str(&format!(
            "* **Date:** {}\n",
            draft
                .date
                .map_or("now".to_string(), |d| format_date(d, &self.opts.date_format))
        ));
        match &draft.template {
            Some(answers) => {
                md.push_str(&format!("* **Template:** {}\n", answers.template().name));
                for (label, answer) in answers.iter() {
                    md.push_str(&format!("  * {label} `{answer}`\n"));
                }
            }
            None => md.push_str(&format!("* **Description:** {}\n", draft.description)),
        }
        self.print_md(&md);
    }

    pub fn print_moods(&self) {
        for mood in Mood::all() {
            println!("{} {}", self.badge(mood), mood.color().hex());
        }
    }

    pub fn print_templates(&self) {
        for template in JournalTemplate::all() {
            self.print_md(&format!("## {} (`{}`)", template.name, template.id));
            for field in &template.fields {
                println!("  - {} [{}]", field.label, field.kind.as_ref());
            }
        }
    }

    pub fn print_prompt(&self, prompt: &str) {
        self.print_md(&format!("**Journaling Prompt:** *{prompt}*"));
    }
}
