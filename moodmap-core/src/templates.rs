//! Journal templates: fixed sets of prompts an entry can be answered against.
//!
//! A templated entry stores one answer per template field, in the template's
//! field order. Answers are addressed by the field label shown on the form.

use crate::moods::Mood;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use strum_macros::AsRefStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Date,
    Mood,
}

#[derive(Debug, PartialEq, Eq)]
pub struct TemplateField {
    pub label: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug, PartialEq, Eq)]
pub struct JournalTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub fields: Vec<TemplateField>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown template '{0}'")]
    UnknownTemplate(String),
    #[error("template '{template}' has no field '{label}'")]
    UnknownField { template: &'static str, label: String },
}

static TEMPLATES: Lazy<Vec<JournalTemplate>> = Lazy::new(|| {
    vec![
        JournalTemplate {
            id: "gratitude",
            name: "Gratitude Journal",
            fields: vec![
                TemplateField {
                    label: "What are you grateful for today?",
                    kind: FieldKind::TextArea,
                },
                TemplateField {
                    label: "How did this make you feel?",
                    kind: FieldKind::Text,
                },
                TemplateField {
                    label: "Gratitude level",
                    kind: FieldKind::Number,
                },
            ],
        },
        JournalTemplate {
            id: "goal-tracking",
            name: "Goal Tracking",
            fields: vec![
                TemplateField {
                    label: "Goal",
                    kind: FieldKind::Text,
                },
                TemplateField {
                    label: "Progress",
                    kind: FieldKind::TextArea,
                },
                TemplateField {
                    label: "Obstacles",
                    kind: FieldKind::TextArea,
                },
                TemplateField {
                    label: "Next steps",
                    kind: FieldKind::Text,
                },
            ],
        },
    ]
});

impl JournalTemplate {
    pub fn all() -> &'static [JournalTemplate] {
        &TEMPLATES
    }

    pub fn find(id: &str) -> Option<&'static JournalTemplate> {
        TEMPLATES.iter().find(|t| t.id == id)
    }

    fn field_index(&self, label: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.label == label)
    }
}

impl FieldKind {
    /// Whether `answer` is acceptable for a field of this kind. Blank answers
    /// are always accepted; templates never make a field mandatory.
    pub fn accepts(self, answer: &str) -> bool {
        let answer = answer.trim();
        if answer.is_empty() {
            return true;
        }
        match self {
            FieldKind::Text | FieldKind::TextArea => true,
            FieldKind::Number => answer.parse::<f64>().is_ok_and(f64::is_finite),
            FieldKind::Date => NaiveDate::parse_from_str(answer, "%Y-%m-%d").is_ok(),
            FieldKind::Mood => Mood::parse(answer).is_ok(),
        }
    }
}

/// The answers of a templated entry, tied to the template they came from.
///
/// Always holds exactly one answer per template field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateAnswers {
    template: &'static JournalTemplate,
    answers: Vec<String>,
}

impl TemplateAnswers {
    /// Blank answers for every field of template `id`.
    pub fn for_template(id: &str) -> Result<Self, TemplateError> {
        let template =
            JournalTemplate::find(id).ok_or_else(|| TemplateError::UnknownTemplate(id.to_string()))?;
        Ok(Self {
            template,
            answers: vec![String::new(); template.fields.len()],
        })
    }

    pub fn template(&self) -> &'static JournalTemplate {
        self.template
    }

    pub fn template_id(&self) -> &'static str {
        self.template.id
    }

    pub fn set(&mut self, label: &str, answer: impl Into<String>) -> Result<(), TemplateError> {
        let idx = self
            .template
            .field_index(label)
            .ok_or_else(|| TemplateError::UnknownField {
                template: self.template.id,
                label: label.to_string(),
            })?;
        self.answers[idx] = answer.into();
        Ok(())
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.template
            .field_index(label)
            .map(|idx| self.answers[idx].as_str())
    }

    /// `(label, answer)` pairs in template order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.template
            .fields
            .iter()
            .zip(self.answers.iter())
            .map(|(field, answer)| (field.label, answer.as_str()))
    }

    /// Labels whose answer does not fit the field kind.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        self.template
            .fields
            .iter()
            .zip(self.answers.iter())
            .filter(|(field, answer)| !field.kind.accepts(answer))
            .map(|(field, _)| field.label)
            .collect()
    }
}
