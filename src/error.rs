use std::fmt;

use crate::field::Field;

/// All errors produced by calcron.
///
/// Every variant is raised at trigger construction; fire-time queries are
/// infallible and return `Option` instead.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ScheduleError {
    /// A field value could not be tokenized into any recognized grammar shape.
    Syntax {
        field: Field,
        value: String,
        message: String,
    },

    /// A syntactically valid token is outside the field's legal range.
    Domain {
        field: Field,
        value: String,
        message: String,
    },

    /// The expression's timezone name was not recognized.
    Timezone { value: String, message: String },

    /// More than one field failed; carries the per-field errors.
    Fields(Vec<ScheduleError>),
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax {
                field,
                value,
                message,
            } => write!(f, "{}: unparseable value '{value}': {message}", field.name()),
            Self::Domain {
                field,
                value,
                message,
            } => write!(f, "{}: value '{value}' out of range: {message}", field.name()),
            Self::Timezone { value, message } => {
                write!(f, "invalid timezone '{value}': {message}")
            }
            Self::Fields(errors) => {
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

impl ScheduleError {
    pub fn syntax(field: Field, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Syntax {
            field,
            value: value.into(),
            message: message.into(),
        }
    }

    pub fn domain(field: Field, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Domain {
            field,
            value: value.into(),
            message: message.into(),
        }
    }

    pub fn timezone(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Timezone {
            value: value.into(),
            message: message.into(),
        }
    }

    /// The field this error is about, if it concerns a single field.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Syntax { field, .. } | Self::Domain { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Fold a collection of per-field errors into one error. A single error
    /// is returned as-is; several are wrapped in [`ScheduleError::Fields`].
    pub(crate) fn aggregate(mut errors: Vec<ScheduleError>) -> Self {
        if errors.len() == 1 {
            errors.remove(0)
        } else {
            Self::Fields(errors)
        }
    }
}
