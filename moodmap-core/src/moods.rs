use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

/// The fixed mood vocabulary an entry can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, AsRefStr, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum Mood {
    Happiness,
    Calmness,
    Energy,
    Sadness,
    Envy,
    Creativity,
    Warmth,
    Serenity,
    Passion,
    Nostalgia,
    Anger,
    Confidence,
    Peacefulness,
    Mystery,
}

/// A plain 24-bit colour, as painted on a marker or a mood badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#RRGGBB`
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

/// Colour used for markers whose mood has no palette entry.
pub const UNSTYLED: Rgb = Rgb::new(0x00, 0x00, 0x00);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown mood '{0}'")]
pub struct MoodParseError(pub String);

impl Mood {
    /// Marker and badge colour for this mood.
    pub const fn color(self) -> Rgb {
        match self {
            Mood::Happiness => Rgb::new(0xFF, 0xFF, 0x00),
            Mood::Calmness => Rgb::new(0x00, 0x00, 0xFF),
            Mood::Energy => Rgb::new(0xFF, 0x00, 0x00),
            Mood::Sadness => Rgb::new(0x80, 0x80, 0x80),
            Mood::Envy => Rgb::new(0x00, 0xFF, 0x00),
            Mood::Creativity => Rgb::new(0x80, 0x00, 0x80),
            Mood::Warmth => Rgb::new(0xFF, 0xA5, 0x00),
            Mood::Serenity => Rgb::new(0x40, 0xE0, 0xD0),
            Mood::Passion => Rgb::new(0x8B, 0x00, 0x00),
            Mood::Nostalgia => Rgb::new(0x8B, 0x45, 0x13),
            Mood::Anger => Rgb::new(0x00, 0x00, 0x00),
            Mood::Confidence => Rgb::new(0xFF, 0xD7, 0x00),
            Mood::Peacefulness => Rgb::new(0x98, 0xFB, 0x98),
            Mood::Mystery => Rgb::new(0x4B, 0x00, 0x82),
        }
    }

    /// Text colour that stays readable on top of [`Mood::color`].
    pub const fn text_color(self) -> Rgb {
        match self {
            Mood::Happiness => Rgb::new(0x00, 0x00, 0x00),
            _ => Rgb::new(0xFF, 0xFF, 0xFF),
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn all() -> impl Iterator<Item = Mood> {
        Mood::iter()
    }

    /// Resolves user input to a mood: canonical names (any case) first, then
    /// the alias registry.
    pub fn parse(input: &str) -> Result<Mood, MoodParseError> {
        let trimmed = input.trim();
        if let Ok(mood) = Mood::from_str(trimmed) {
            return Ok(mood);
        }
        MoodAliases::resolve(trimmed).ok_or_else(|| MoodParseError(trimmed.to_string()))
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

pub struct MoodAliases;

impl MoodAliases {
    /// Global alias registry (lowercased alias → mood).
    ///
    /// Starts empty and is filled from the `[moods]` table of the config file.
    fn registry() -> &'static RwLock<HashMap<String, Mood>> {
        static REGISTRY: Lazy<RwLock<HashMap<String, Mood>>> =
            Lazy::new(|| RwLock::new(HashMap::new()));
        &REGISTRY
    }

    /// Adds `(alias, target)` pairs. Targets that are not a mood, and aliases
    /// that shadow a canonical mood name, are skipped.
    ///
    /// Returns the number of aliases registered.
    pub fn extend(aliases: &[(String, String)]) -> usize {
        let Ok(mut reg) = Self::registry().write() else {
            return 0;
        };
        let mut added = 0;
        for (alias, target) in aliases {
            if Self::is_canonical(alias) {
                tracing::warn!(alias = %alias, "mood alias shadows a canonical mood, skipped");
                continue;
            }
            match Mood::from_str(target.trim()) {
                Ok(mood) => {
                    reg.insert(alias.trim().to_ascii_lowercase(), mood);
                    added += 1;
                }
                Err(_) => {
                    tracing::warn!(alias = %alias, target = %target, "mood alias target is not a mood, skipped");
                }
            }
        }
        added
    }

    /// Returns `true` if `word` names a mood of the vocabulary (any case).
    pub fn is_canonical(word: &str) -> bool {
        Mood::iter().any(|mood| mood.as_ref().eq_ignore_ascii_case(word.trim()))
    }

    pub fn resolve(alias: &str) -> Option<Mood> {
        let reg = Self::registry().read().ok()?;
        reg.get(&alias.to_ascii_lowercase()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names_in_any_case() {
        assert_eq!(Mood::parse("Energy"), Ok(Mood::Energy));
        assert_eq!(Mood::parse("calmness"), Ok(Mood::Calmness));
        assert_eq!(Mood::parse("  MYSTERY "), Ok(Mood::Mystery));
    }

    #[test]
    fn names_are_static_and_match_display() {
        let names: Vec<&'static str> = Mood::all().map(Mood::name).collect();
        assert_eq!(names.first(), Some(&"Happiness"));
        assert_eq!(names.last(), Some(&"Mystery"));
        for mood in Mood::all() {
            assert_eq!(mood.name(), mood.to_string());
        }
    }

    #[test]
    fn unknown_mood_is_an_error() {
        assert_eq!(
            Mood::parse("blue"),
            Err(MoodParseError("blue".to_string()))
        );
    }

    #[test]
    fn aliases_extend() {
        let added = MoodAliases::extend(&[
            ("chill".into(), "Calmness".into()),
            ("Mad".into(), "anger".into()),
        ]);
        assert_eq!(added, 2);
        assert_eq!(Mood::parse("chill"), Ok(Mood::Calmness));
        assert_eq!(Mood::parse("MAD"), Ok(Mood::Anger));
    }

    #[test]
    fn aliases_cannot_shadow_canonical_moods() {
        let added = MoodAliases::extend(&[
            ("energy".into(), "Sadness".into()),
            ("gloom".into(), "not-a-mood".into()),
        ]);
        assert_eq!(added, 0);
        assert_eq!(Mood::parse("energy"), Ok(Mood::Energy));
        assert!(Mood::parse("gloom").is_err());
    }

    #[test]
    fn palette_matches_vocabulary() {
        assert_eq!(Mood::all().count(), 14);
        assert_eq!(Mood::Happiness.color().hex(), "#FFFF00");
        assert_eq!(Mood::Serenity.color().hex(), "#40E0D0");
        assert_eq!(Mood::Happiness.text_color(), Rgb::new(0, 0, 0));
        assert_eq!(Mood::Anger.text_color(), Rgb::new(0xFF, 0xFF, 0xFF));
    }
}
