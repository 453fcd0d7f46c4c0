//! Typed node attributes.

use serde::{Deserialize, Serialize};

/// Panel flavor, from the `panelType` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelType {
    /// Informational panel
    Info,
    /// Generic note; also used for absent, custom or unrecognized types
    #[default]
    Note,
    /// Tip
    Tip,
    /// Warning
    Warning,
    /// Error
    Error,
    /// Success
    Success,
}

impl PanelType {
    /// Map a `panelType` attribute value, falling back to [`PanelType::Note`].
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("info") => PanelType::Info,
            Some("tip") => PanelType::Tip,
            Some("warning") => PanelType::Warning,
            Some("error") => PanelType::Error,
            Some("success") => PanelType::Success,
            _ => PanelType::Note,
        }
    }

    /// Bracketed tag printed on the first line of a rendered panel.
    pub fn tag(&self) -> &'static str {
        match self {
            PanelType::Info => "[INFO]",
            PanelType::Note => "[NOTE]",
            PanelType::Tip => "[TIP]",
            PanelType::Warning => "[WARNING]",
            PanelType::Error => "[ERROR]",
            PanelType::Success => "[SUCCESS]",
        }
    }
}

/// Completion state of a checklist entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskState {
    /// Open (`TODO`)
    #[default]
    Todo,
    /// Completed (`DONE`)
    Done,
}

impl TaskState {
    /// Map a `state` attribute value; anything but `DONE` is open.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("done") => TaskState::Done,
            _ => TaskState::Todo,
        }
    }

    /// Checkbox marker including the trailing space.
    pub fn marker(&self) -> &'static str {
        match self {
            TaskState::Todo => "[ ] ",
            TaskState::Done => "[x] ",
        }
    }
}
