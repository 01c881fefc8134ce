//! Transient user-facing notices.
//!
//! A notice is active for `notice_duration`, then fades for `notice_fade`
//! before it is removed. The session schedules both steps; this type only
//! tracks what is currently showing.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoticeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticePhase {
    Active,
    Fading,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: NoticeId,
    pub text: String,
    pub phase: NoticePhase,
}

impl Notice {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == NoticePhase::Active
    }
}

/// Notices currently showing, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notices {
    entries: Vec<Notice>,
    next_id: u32,
}

impl Notices {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a new active notice.
    pub fn push(&mut self, text: impl Into<String>) -> NoticeId {
        let id = NoticeId(self.next_id);
        self.next_id += 1;
        self.entries.push(Notice {
            id,
            text: text.into(),
            phase: NoticePhase::Active,
        });
        id
    }

    /// Start fading a notice. Returns false if it is gone or already fading.
    pub fn dismiss(&mut self, id: NoticeId) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id) {
            Some(notice) if notice.is_active() => {
                notice.phase = NoticePhase::Fading;
                true
            }
            _ => false,
        }
    }

    /// Remove a notice. Returns false if it was already gone.
    pub fn remove(&mut self, id: NoticeId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        self.entries.len() != before
    }

    #[must_use]
    pub fn get(&self, id: NoticeId) -> Option<&Notice> {
        self.entries.iter().find(|n| n.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut notices = Notices::new();
        let id = notices.push("There are still matches");

        assert!(notices.get(id).is_some_and(Notice::is_active));
        assert!(notices.dismiss(id));
        assert_eq!(notices.get(id).map(|n| n.phase), Some(NoticePhase::Fading));
        assert!(!notices.dismiss(id));

        assert!(notices.remove(id));
        assert!(notices.is_empty());
        assert!(!notices.remove(id));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut notices = Notices::new();
        let a = notices.push("a");
        notices.clear();
        let b = notices.push("b");
        assert_ne!(a, b);
        assert_eq!(notices.len(), 1);
    }
}
