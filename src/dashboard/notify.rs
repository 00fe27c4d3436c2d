//! Transient notifications with newest-message-wins auto-clear
//!
//! Each `show` bumps a generation counter and records when that generation
//! should be released. A release only clears the notification if its
//! generation is still current, so a stale timer never hides a newer message.

use std::time::{Duration, Instant};

/// How long a notification stays visible
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(2000);

/// Visible state of the notification slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    pub visible: bool,
    pub message: String,
}

/// Handle for a scheduled auto-clear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearTicket {
    pub generation: u64,
    pub due: Instant,
}

/// Single-slot notification state with a generation-tagged release
#[derive(Debug)]
pub struct Notifier {
    current: Notification,
    generation: u64,
    pending: Option<ClearTicket>,
    duration: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(NOTIFICATION_DURATION)
    }
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: Notification::default(),
            generation: 0,
            pending: None,
            duration,
        }
    }

    /// Show a message, superseding any pending auto-clear
    pub fn show(&mut self, message: impl Into<String>, now: Instant) -> ClearTicket {
        self.generation += 1;
        self.current = Notification {
            visible: true,
            message: message.into(),
        };
        let ticket = ClearTicket {
            generation: self.generation,
            due: now + self.duration,
        };
        self.pending = Some(ticket);
        ticket
    }

    /// Clear the notification if `ticket` still belongs to it.
    /// Returns true if something was cleared.
    pub fn release(&mut self, ticket: ClearTicket) -> bool {
        if ticket.generation != self.generation || !self.current.visible {
            return false;
        }
        self.current = Notification::default();
        self.pending = None;
        true
    }

    /// Fire the pending auto-clear if it is due
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(ticket) if now >= ticket.due => self.release(ticket),
            _ => false,
        }
    }

    /// The visible message, if any
    pub fn visible_message(&self) -> Option<&str> {
        self.current
            .visible
            .then_some(self.current.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_then_auto_clear() {
        let start = Instant::now();
        let mut notifier = Notifier::default();
        notifier.show("✅ 已复制到剪贴板", start);
        assert_eq!(notifier.visible_message(), Some("✅ 已复制到剪贴板"));

        assert!(!notifier.tick(start + Duration::from_millis(1999)));
        assert!(notifier.visible_message().is_some());

        assert!(notifier.tick(start + Duration::from_millis(2000)));
        assert_eq!(notifier.visible_message(), None);
    }

    #[test]
    fn test_stale_release_does_not_clear_newer_message() {
        let start = Instant::now();
        let mut notifier = Notifier::default();
        let first = notifier.show("first", start);
        notifier.show("second", start + Duration::from_millis(1500));

        assert!(!notifier.release(first));
        assert_eq!(notifier.visible_message(), Some("second"));

        // The first message's deadline passes without effect
        assert!(!notifier.tick(start + Duration::from_millis(2100)));
        assert_eq!(notifier.visible_message(), Some("second"));

        assert!(notifier.tick(start + Duration::from_millis(3500)));
        assert_eq!(notifier.visible_message(), None);
    }

    #[test]
    fn test_release_is_one_shot() {
        let start = Instant::now();
        let mut notifier = Notifier::default();
        let ticket = notifier.show("once", start);
        assert!(notifier.release(ticket));
        assert!(!notifier.release(ticket));
    }

    #[test]
    fn test_custom_duration() {
        let start = Instant::now();
        let mut notifier = Notifier::new(Duration::from_millis(10));
        let ticket = notifier.show("quick", start);
        assert_eq!(ticket.due, start + Duration::from_millis(10));
        assert!(notifier.tick(start + Duration::from_millis(10)));
    }
}
