//! Requests the editor core makes to its host shell
//!
//! Confirmation dialogs, name prompts and export-format choices are issued
//! through [`Host`] so the state logic does not depend on any dialog toolkit.

use std::collections::VecDeque;

use serde::Serialize;

use crate::export::ExportFormat;

/// Destructive actions that need the user's consent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirm {
    /// Clear the scene and the conversation
    NewFile,
    /// Replace the scene with a stored version, dropping unsaved changes
    RestoreVersion { name: String },
}

impl Confirm {
    pub fn message(&self) -> String {
        match self {
            Confirm::NewFile => "Start a new project? This clears the current scene.".to_string(),
            Confirm::RestoreVersion { name } => format!(
                "Restore \"{name}\"? Unsaved changes to the current scene will be lost."
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Non-fatal message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Host shell answering the editor's questions
pub trait Host {
    fn confirm(&mut self, request: Confirm) -> bool;

    /// Ask for a name, offering `suggested`. `None` = cancelled.
    fn request_name(&mut self, suggested: &str) -> Option<String>;

    fn choose_export(&mut self) -> Option<ExportFormat>;

    fn notify(&mut self, notice: Notice);
}

/// Host that answers from pre-loaded queues and records notices.
///
/// With empty queues it declines confirmations, cancels name prompts and
/// picks no export format.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    pub confirmations: VecDeque<bool>,
    pub names: VecDeque<Option<String>>,
    pub export_choices: VecDeque<ExportFormat>,
    pub notices: Vec<Notice>,
    /// Every confirmation asked, in order
    pub asked: Vec<Confirm>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer_confirm(&mut self, answer: bool) -> &mut Self {
        self.confirmations.push_back(answer);
        self
    }

    pub fn answer_name(&mut self, name: Option<&str>) -> &mut Self {
        self.names.push_back(name.map(str::to_string));
        self
    }

    pub fn answer_export(&mut self, format: ExportFormat) -> &mut Self {
        self.export_choices.push_back(format);
        self
    }

    /// Drop answers that were queued but never asked for
    pub fn clear_answers(&mut self) -> &mut Self {
        self.confirmations.clear();
        self.names.clear();
        self.export_choices.clear();
        self
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl Host for ScriptedHost {
    fn confirm(&mut self, request: Confirm) -> bool {
        tracing::debug!("Confirm: {}", request.message());
        self.asked.push(request);
        self.confirmations.pop_front().unwrap_or(false)
    }

    fn request_name(&mut self, _suggested: &str) -> Option<String> {
        self.names.pop_front().flatten()
    }

    fn choose_export(&mut self) -> Option<ExportFormat> {
        self.export_choices.pop_front()
    }

    fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::info!("{}", notice.text),
            NoticeLevel::Error => tracing::warn!("{}", notice.text),
        }
        self.notices.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_host_defaults_decline() {
        let mut host = ScriptedHost::new();
        assert!(!host.confirm(Confirm::NewFile));
        assert_eq!(host.request_name("Version 1"), None);
        assert_eq!(host.choose_export(), None);
        assert_eq!(host.asked, vec![Confirm::NewFile]);
    }

    #[test]
    fn test_scripted_host_answers_in_order() {
        let mut host = ScriptedHost::new();
        host.answer_confirm(true).answer_confirm(false);
        host.answer_name(Some("Draft"));
        assert!(host.confirm(Confirm::NewFile));
        assert!(!host.confirm(Confirm::NewFile));
        assert_eq!(host.request_name("x"), Some("Draft".to_string()));
    }

    #[test]
    fn test_confirm_messages_name_the_version() {
        let msg = Confirm::RestoreVersion {
            name: "Tower".into(),
        }
        .message();
        assert!(msg.contains("\"Tower\""));
    }

    #[test]
    fn test_clear_answers_drops_queued_replies() {
        let mut host = ScriptedHost::new();
        host.answer_confirm(true).answer_name(Some("Draft"));
        host.clear_answers();
        assert!(!host.confirm(Confirm::NewFile));
        assert_eq!(host.request_name("x"), None);
        assert_eq!(host.choose_export(), None);
    }
}
