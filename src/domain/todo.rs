use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Integer identifier assigned by the store on first save.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoStatus {
    Pending,
    Completed,
}

impl TodoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Pending => "PENDING",
            TodoStatus::Completed => "COMPLETED",
        }
    }
}

impl FromStr for TodoStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(TodoStatus::Pending),
            "COMPLETED" => Ok(TodoStatus::Completed),
            _ => Err(()),
        }
    }
}

/// Persisted todos always carry `Some(id)`; `None` only exists on the way into
/// the store's insert path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: Option<TodoId>,
    pub text: String,
    pub status: TodoStatus,
}

/// One rejected field in a create/update payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// Inbound body for POST /todos. Both fields are deserialized leniently so a
/// missing or malformed value surfaces as a field error rather than a body
/// rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl CreateTodo {
    /// Checks presence and shape of both fields, collecting every violation.
    /// On success yields a todo with no id, ready for the store's insert path.
    pub fn validate(self) -> Result<Todo, Vec<FieldError>> {
        let mut errors = Vec::new();

        let text = match self.text {
            Some(t) if !t.trim().is_empty() => Some(t),
            _ => {
                errors.push(FieldError::new("text", "must not be empty"));
                None
            }
        };
        let status = match self.status.as_deref().map(TodoStatus::from_str) {
            Some(Ok(s)) => Some(s),
            _ => {
                errors.push(FieldError::new("status", "must be one of PENDING, COMPLETED"));
                None
            }
        };

        match (text, status) {
            (Some(text), Some(status)) => Ok(Todo { id: None, text, status }),
            _ => Err(errors),
        }
    }
}

/// Inbound body for PUT /todos/{id}; omitted fields keep the stored value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodo {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl UpdateTodo {
    /// Overlays the supplied fields onto an existing record. An unknown status
    /// string is the only rejectable input here.
    pub fn apply(self, todo: &mut Todo) -> Result<(), Vec<FieldError>> {
        if let Some(status) = self.status.as_deref() {
            match status.parse() {
                Ok(s) => todo.status = s,
                Err(()) => {
                    return Err(vec![FieldError::new(
                        "status",
                        "must be one of PENDING, COMPLETED",
                    )]);
                }
            }
        }
        if let Some(text) = self.text {
            todo.text = text;
        }
        Ok(())
    }
}
