use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{MIN_MESSAGE_CHARS, MIN_NAME_CHARS};
use crate::prefs::{PreferenceStore, keys};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Field::Name),
            "email" => Some(Field::Email),
            "message" => Some(Field::Message),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }

    fn index(&self) -> usize {
        match self {
            Field::Name => 0,
            Field::Email => 1,
            Field::Message => 2,
        }
    }
}

/// Validation outcome shown next to a field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldState {
    #[default]
    Untouched,
    Valid,
    Invalid(String),
}

/// Check one field's value. The value is trimmed first.
pub fn validate(field: Field, raw: &str) -> Result<(), String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(format!("{} is required", field.label()));
    }
    match field {
        Field::Email if !EMAIL.is_match(value) => {
            Err("Please enter a valid email address".to_string())
        }
        Field::Message if value.chars().count() < MIN_MESSAGE_CHARS => Err(format!(
            "Message must be at least {MIN_MESSAGE_CHARS} characters"
        )),
        Field::Name if value.chars().count() < MIN_NAME_CHARS => Err(format!(
            "Name must be at least {MIN_NAME_CHARS} characters"
        )),
        _ => Ok(()),
    }
}

/// A validated, trimmed contact message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
    /// Name exactly as entered, echoed back in the confirmation.
    pub entered_name: String,
}

impl Submission {
    pub fn first_name(&self) -> &str {
        self.name.split(' ').next().unwrap_or_default()
    }

    pub fn confirmation(&self) -> String {
        format!(
            "Thank you, {}! Your message has been sent.",
            self.entered_name
        )
    }
}

/// Contact form state. Errors stay attached to their field; once a field
/// has been checked it is re-checked on every edit.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    values: [String; 3],
    states: [FieldState; 3],
    submitting: bool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn state(&self, field: Field) -> &FieldState {
        &self.states[field.index()]
    }

    pub fn edit(&mut self, field: Field, value: &str) {
        let i = field.index();
        self.values[i] = value.to_string();
        if self.states[i] != FieldState::Untouched {
            self.check(field);
        }
    }

    /// Validate a field when focus leaves it.
    pub fn blur(&mut self, field: Field) -> bool {
        self.check(field)
    }

    fn check(&mut self, field: Field) -> bool {
        let i = field.index();
        match validate(field, &self.values[i]) {
            Ok(()) => {
                self.states[i] = FieldState::Valid;
                true
            }
            Err(msg) => {
                self.states[i] = FieldState::Invalid(msg);
                false
            }
        }
    }

    /// Character counter shown under the message box.
    pub fn message_len(&self) -> usize {
        self.value(Field::Message).chars().count()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate every field. On success the form enters the submitting state
    /// and the trimmed submission is returned; otherwise every failing field
    /// is reported and the form stays editable.
    pub fn submit(&mut self) -> Result<Submission, Vec<(Field, String)>> {
        let mut errors = Vec::new();
        for field in Field::ALL {
            if !self.check(field)
                && let FieldState::Invalid(msg) = self.state(field)
            {
                errors.push((field, msg.clone()));
            }
        }
        if !errors.is_empty() {
            tracing::debug!("contact form rejected: {} invalid fields", errors.len());
            return Err(errors);
        }

        self.submitting = true;
        Ok(Submission {
            name: self.value(Field::Name).trim().to_string(),
            email: self.value(Field::Email).trim().to_string(),
            message: self.value(Field::Message).trim().to_string(),
            entered_name: self.value(Field::Name).to_string(),
        })
    }

    /// Finish a delivered submission: remember the visitor's first name,
    /// clear the form and return the status line to show.
    pub fn complete(&mut self, submission: &Submission, prefs: &mut impl PreferenceStore) -> String {
        prefs.set(keys::VISITOR_NAME, submission.first_name());
        *self = Self::default();
        submission.confirmation()
    }
}
