use anyhow::{Result, anyhow, bail};
use moodmap_core::{Config, EntryId, LngLat, MarkerHandle, Mood};
use regex::Regex;
use std::sync::LazyLock;

/// One line of session input, already parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Click(LngLat),
    Open(EntryId),
    Tap(MarkerHandle),
    Title(String),
    Mood(Mood),
    Date(String),
    /// Without text the description is written in `$EDITOR`.
    Desc(Option<String>),
    /// Without an id the template is dropped.
    Template(Option<String>),
    Answer { label: String, text: String },
    Submit,
    Cancel,
    Delete(EntryId),
    Search(String),
    FilterMood(Option<Mood>),
    From(String),
    To(String),
    List,
    Markers,
    Show,
    Prompt,
    Templates,
    Moods,
    Help,
    Quit,
}

pub const HELP: &str = r#"
| command | what it does |
|-|-|
| `click LNG LAT` | start a new entry at that point |
| `open ID` / `tap HANDLE` | edit an entry, by id or by clicking its marker |
| `title TEXT` / `mood NAME` / `date YYYY-MM-DD` | fill in the form |
| `desc [TEXT]` | set the description (no text opens your editor) |
| `template [ID]` / `answer "LABEL" TEXT` | use a template and answer its fields |
| `submit` / `cancel` | save or discard the open entry |
| `delete ID` | delete an entry |
| `search [TEXT]` / `filter-mood [NAME]` | filter by title or mood |
| `from [DATE]` / `to [DATE]` | filter by date range |
| `list` / `markers` / `show` | entries, map markers, the open form |
| `prompt` / `templates` / `moods` | inspiration and reference |
| `quit` | leave |
|-|-|
"#;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)"|(\S+)"#).expect("valid token regex"));

/// Splits a line into words; double quotes group words and are stripped.
fn tokenize(line: &str) -> Vec<String> {
    TOKEN
        .captures_iter(line)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

fn number<T: std::str::FromStr>(word: Option<&String>, what: &str) -> Result<T> {
    let word = word.ok_or_else(|| anyhow!("missing {what}"))?;
    word.parse::<T>()
        .map_err(|_| anyhow!("'{word}' is not a valid {what}"))
}

/// Like [`Mood::parse`], listing the vocabulary when the name is unknown.
fn mood(name: &str) -> Result<Mood> {
    Mood::parse(name)
        .map_err(|e| anyhow!("{e}; moods are {}", Config::mood_names().join(", ")))
}

fn rest(words: &[String]) -> String {
    words.join(" ")
}

/// Parses one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let words = tokenize(trimmed);
    let Some((name, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "click" => {
            let lng: f64 = number(args.first(), "longitude")?;
            let lat: f64 = number(args.get(1), "latitude")?;
            Command::Click(LngLat::new(lng, lat)?)
        }
        "open" => Command::Open(EntryId(number(args.first(), "entry id")?)),
        "tap" => {
            let handle = args
                .first()
                .map(|h| h.trim_start_matches('#').to_string());
            Command::Tap(MarkerHandle(number(handle.as_ref(), "marker handle")?))
        }
        "title" => Command::Title(rest(args)),
        "mood" => {
            let name = args.first().ok_or_else(|| anyhow!("missing mood"))?;
            Command::Mood(mood(name)?)
        }
        "date" => Command::Date(rest(args)),
        "desc" | "description" => match args {
            [] => Command::Desc(None),
            _ => Command::Desc(Some(rest(args))),
        },
        "template" => Command::Template(args.first().cloned()),
        "answer" => {
            let (label, text) = args
                .split_first()
                .ok_or_else(|| anyhow!("usage: answer \"LABEL\" TEXT"))?;
            Command::Answer {
                label: label.clone(),
                text: rest(text),
            }
        }
        "submit" | "save" => Command::Submit,
        "cancel" => Command::Cancel,
        "delete" => Command::Delete(EntryId(number(args.first(), "entry id")?)),
        "search" => Command::Search(rest(args)),
        "filter-mood" => match args.first().map(String::as_str) {
            None | Some("all") => Command::FilterMood(None),
            Some(name) => Command::FilterMood(Some(mood(name)?)),
        },
        "from" => Command::From(rest(args)),
        "to" => Command::To(rest(args)),
        "list" => Command::List,
        "markers" => Command::Markers,
        "show" => Command::Show,
        "prompt" => Command::Prompt,
        "templates" => Command::Templates,
        "moods" => Command::Moods,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{other}' (try 'help')"),
    };
    Ok(Some(command))
}
