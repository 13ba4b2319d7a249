//! Flag listing sessions

use griefprevention_api::{FlagType, Subject};

/// State of one player's flag listing view.
///
/// Held by the caller (usually per player in the command layer) and passed
/// to [`FlagService::list_for_session`](crate::FlagService::list_for_session)
/// so paging through a listing keeps the last selected tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSession {
    subject: Subject,
    flag_type: FlagType,
}

impl FlagSession {
    /// A session configuring `subject`, starting on the tab matching its kind
    pub fn new(subject: Subject) -> Self {
        let flag_type = subject.flag_type().unwrap_or(FlagType::All);
        Self { subject, flag_type }
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Last active listing tab
    pub fn flag_type(&self) -> FlagType {
        self.flag_type
    }

    pub fn set_flag_type(&mut self, flag_type: FlagType) {
        self.flag_type = flag_type;
    }
}

impl Default for FlagSession {
    fn default() -> Self {
        Self::new(Subject::Global)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_initial_tab_follows_subject() {
        assert_eq!(FlagSession::default().flag_type(), FlagType::All);
        assert_eq!(FlagSession::new(Subject::group("vip")).flag_type(), FlagType::Group);
        assert_eq!(FlagSession::new(Subject::User(Uuid::new_v4())).flag_type(), FlagType::Player);
    }

    #[test]
    fn test_tab_is_remembered() {
        let mut session = FlagSession::default();
        session.set_flag_type(FlagType::Override);
        assert_eq!(session.flag_type(), FlagType::Override);
        assert_eq!(session.subject(), &Subject::Global);
    }
}
