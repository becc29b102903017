use std::path::PathBuf;

use chrono::{DateTime, Utc};
use notify::{Event, EventKind, event::ModifyKind};

/// A write to the watched log, as observed by the filesystem watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogChangedEvent {
    pub path: PathBuf,
    pub timestamp: DateTime<Utc>,
}

impl LogChangedEvent {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            timestamp: Utc::now(),
        }
    }

    /// Accepts content writes only; metadata, rename, create and access
    /// events are noise for this watcher.
    ///
    /// The subscription is non-recursive on `watched`, so every delivered
    /// event already concerns it. Backends report absolute or canonical paths
    /// that need not share a prefix with the configured one.
    pub fn from_notify(event: &Event, watched: &std::path::Path) -> Option<Self> {
        if !is_write(&event.kind) {
            return None;
        }
        let path = event
            .paths
            .first()
            .cloned()
            .unwrap_or_else(|| watched.to_path_buf());
        Some(Self::new(path))
    }
}

pub fn is_write(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any | ModifyKind::Other)
    )
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use notify::event::{AccessKind, CreateKind, DataChange, MetadataKind, RenameMode};

    use super::*;

    #[test]
    fn test_write_kinds() {
        assert!(is_write(&EventKind::Modify(ModifyKind::Data(DataChange::Any))));
        assert!(is_write(&EventKind::Modify(ModifyKind::Data(DataChange::Content))));
        assert!(is_write(&EventKind::Modify(ModifyKind::Any)));

        assert!(!is_write(&EventKind::Modify(ModifyKind::Metadata(MetadataKind::Any))));
        assert!(!is_write(&EventKind::Modify(ModifyKind::Name(RenameMode::Any))));
        assert!(!is_write(&EventKind::Create(CreateKind::File)));
        assert!(!is_write(&EventKind::Access(AccessKind::Any)));
    }

    #[test]
    fn test_from_notify_keeps_reported_path() {
        let watched = Path::new("/srv/logs");
        let event = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Any)))
            .add_path(PathBuf::from("/srv/logs/access.log"));
        let changed = LogChangedEvent::from_notify(&event, watched).unwrap();
        assert_eq!(changed.path, PathBuf::from("/srv/logs/access.log"));

        let bare = Event::new(EventKind::Modify(ModifyKind::Any));
        let changed = LogChangedEvent::from_notify(&bare, watched).unwrap();
        assert_eq!(changed.path, PathBuf::from("/srv/logs"));

        let metadata = Event::new(EventKind::Modify(ModifyKind::Metadata(MetadataKind::Any)))
            .add_path(PathBuf::from("/srv/logs/access.log"));
        assert!(LogChangedEvent::from_notify(&metadata, watched).is_none());
    }

    #[test]
    fn test_relative_watch_accepts_absolute_event_paths() {
        // Backends resolve a relative watch to an absolute (or canonical) path.
        let watched = Path::new("logs");
        let event = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content)))
            .add_path(PathBuf::from("/tmp/x/logs/access.log"));
        let changed = LogChangedEvent::from_notify(&event, watched).unwrap();
        assert_eq!(changed.path, PathBuf::from("/tmp/x/logs/access.log"));

        let private = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Any)))
            .add_path(PathBuf::from("/private/var/folders/t/logs/access.log"));
        assert!(LogChangedEvent::from_notify(&private, Path::new("/var/folders/t/logs")).is_some());
    }
}
