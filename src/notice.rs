use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
    /// Missing storage permission, shown apart from network problems.
    Permission,
}

/// Follow-up offered alongside a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeAction {
    OpenGallery,
}

/// A message shown once and dismissed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    pub action: Option<NoticeAction>,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
            action: None,
        }
    }

    pub fn failed(operation: &str, err: &AppError) -> Self {
        let kind = if err.is_permission() {
            NoticeKind::Permission
        } else {
            NoticeKind::Error
        };
        Self {
            kind,
            title: format!("{operation} failed"),
            message: err.to_string(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: NoticeAction) -> Self {
        self.action = Some(action);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn permission_errors_get_their_own_kind() {
        let err = AppError::Permission {
            path: PathBuf::from("/exports"),
        };
        assert_eq!(Notice::failed("Export", &err).kind, NoticeKind::Permission);

        let err = AppError::Network("offline".to_owned());
        let notice = Notice::failed("Save", &err);
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.title, "Save failed");
    }
}
