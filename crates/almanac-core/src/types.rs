use serde::{Deserialize, Serialize};

/// Repetition category of a calendar event.
///
/// Tokens are matched case-insensitively. An empty token means `None`; any
/// other unknown token is kept as `Unrecognized` so it can be passed back out
/// unchanged, and it never produces an occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecurrenceKind {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Unrecognized(String),
}

impl RecurrenceKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Unrecognized(token) => token,
        }
    }

    /// Returns `true` for every kind except `None`.
    ///
    /// Unrecognized kinds count as recurring: they go through the date walk
    /// and simply never match.
    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl From<&str> for RecurrenceKind {
    fn from(token: &str) -> Self {
        let trimmed = token.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "none" => Self::None,
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            _ => Self::Unrecognized(trimmed.to_string()),
        }
    }
}

impl From<String> for RecurrenceKind {
    fn from(token: String) -> Self {
        Self::from(token.as_str())
    }
}

impl From<RecurrenceKind> for String {
    fn from(kind: RecurrenceKind) -> Self {
        match kind {
            RecurrenceKind::Unrecognized(token) => token,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event category used for styling and filtering by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    #[default]
    Meeting,
    Standup,
    AllHands,
    OneOnOne,
    Training,
    Interview,
    Holiday,
    Conference,
    Review,
    Planning,
    Appointment,
    Reminder,
    OutOfOffice,
    Other(String),
}

impl EventType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Meeting => "meeting",
            Self::Standup => "standup",
            Self::AllHands => "all-hands",
            Self::OneOnOne => "1:1",
            Self::Training => "training",
            Self::Interview => "interview",
            Self::Holiday => "holiday",
            Self::Conference => "conference",
            Self::Review => "review",
            Self::Planning => "planning",
            Self::Appointment => "appointment",
            Self::Reminder => "reminder",
            Self::OutOfOffice => "out-of-office",
            Self::Other(token) => token,
        }
    }
}

impl From<&str> for EventType {
    fn from(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "" | "meeting" => Self::Meeting,
            "standup" => Self::Standup,
            "all-hands" | "allhands" => Self::AllHands,
            "1:1" | "one-on-one" | "oneonone" => Self::OneOnOne,
            "training" => Self::Training,
            "interview" => Self::Interview,
            "holiday" => Self::Holiday,
            "conference" => Self::Conference,
            "review" => Self::Review,
            "planning" => Self::Planning,
            "appointment" => Self::Appointment,
            "reminder" => Self::Reminder,
            "out-of-office" | "ooo" => Self::OutOfOffice,
            _ => Self::Other(token.to_string()),
        }
    }
}

impl From<String> for EventType {
    fn from(token: String) -> Self {
        Self::from(token.as_str())
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Other(token) => token,
            other => other.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
