//! Status Text Reporting
//!
//! The classifier reports each decision as a short human-readable line for
//! the ground station. Delivery is not this crate's concern: lines go to a
//! [`StatusSink`], and the telemetry side decides what to do with them.
//!
//! [`StatusQueue`] is a fixed-capacity queue the telemetry task can drain
//! into STATUSTEXT messages:
//!
//! - **Heapless Queue**: 8 messages, oldest dropped when full
//! - **Single Chunk**: text truncated to 50 bytes (one STATUSTEXT payload)
//! - **Severity**: MAV_SEVERITY numbering (0 = emergency .. 7 = debug)

use heapless::{Deque, String};

/// STATUSTEXT payload size
pub const MAX_STATUS_LEN: usize = 50;

/// Queue capacity
const QUEUE_CAPACITY: usize = 8;

/// Message severity, numbered as MAV_SEVERITY
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Severity {
    /// System is unusable
    Emergency = 0,
    /// Action must be taken immediately
    Alert = 1,
    /// Critical conditions
    Critical = 2,
    /// Error conditions
    Error = 3,
    /// Warning conditions
    Warning = 4,
    /// Normal but significant conditions
    Notice = 5,
    /// Informational messages
    Info = 6,
    /// Debug-level messages
    Debug = 7,
}

impl Severity {
    /// Convert a MAV_SEVERITY level; values above 7 map to `Debug`
    pub const fn from_level(level: u8) -> Self {
        match level {
            0 => Severity::Emergency,
            1 => Severity::Alert,
            2 => Severity::Critical,
            3 => Severity::Error,
            4 => Severity::Warning,
            5 => Severity::Notice,
            6 => Severity::Info,
            _ => Severity::Debug,
        }
    }

    /// MAV_SEVERITY level
    pub const fn level(self) -> u8 {
        self as u8
    }
}

/// Destination for status lines
pub trait StatusSink {
    /// Report one line of text
    fn send(&mut self, severity: Severity, text: &str);
}

/// Discards everything
impl StatusSink for () {
    fn send(&mut self, _severity: Severity, _text: &str) {}
}

/// Queued status line
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    /// Severity the line was sent with
    pub severity: Severity,
    /// Text, at most MAX_STATUS_LEN bytes
    pub text: String<MAX_STATUS_LEN>,
}

/// Fixed-capacity queue of pending status lines
#[derive(Debug)]
pub struct StatusQueue {
    queue: Deque<StatusMessage, QUEUE_CAPACITY>,
    dropped_count: u32,
}

impl StatusQueue {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            queue: Deque::new(),
            dropped_count: 0,
        }
    }

    /// Number of pending messages
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Messages dropped because the queue was full
    pub fn dropped_count(&self) -> u32 {
        self.dropped_count
    }

    /// Remove and return the oldest pending message
    pub fn pop(&mut self) -> Option<StatusMessage> {
        self.queue.pop_front()
    }

    /// Drain all pending messages, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = StatusMessage> + '_ {
        core::iter::from_fn(move || self.queue.pop_front())
    }
}

impl Default for StatusQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for StatusQueue {
    fn send(&mut self, severity: Severity, text: &str) {
        let text = truncate(text, MAX_STATUS_LEN);
        let mut message = StatusMessage {
            severity,
            text: String::new(),
        };
        // Cannot fail: truncated to capacity above
        let _ = message.text.push_str(text);

        if self.queue.is_full() {
            self.queue.pop_front();
            self.dropped_count += 1;
            crate::log_warn!("Status queue full, dropped {} messages", self.dropped_count);
        }

        let _ = self.queue.push_back(message);
    }
}

/// Longest prefix of `text` that fits in `max` bytes on a char boundary
fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_levels() {
        assert_eq!(Severity::Critical.level(), 2);
        assert_eq!(Severity::from_level(2), Severity::Critical);
        assert_eq!(Severity::from_level(0), Severity::Emergency);
        assert_eq!(Severity::from_level(200), Severity::Debug);
        assert!(Severity::Emergency < Severity::Debug);
    }

    #[test]
    fn test_queue_fifo() {
        let mut queue = StatusQueue::new();
        queue.send(Severity::Info, "first");
        queue.send(Severity::Critical, "second");
        assert_eq!(queue.len(), 2);

        let msg = queue.pop().unwrap();
        assert_eq!(msg.severity, Severity::Info);
        assert_eq!(msg.text.as_str(), "first");
        assert_eq!(queue.pop().unwrap().text.as_str(), "second");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_drops_oldest_when_full() {
        let mut queue = StatusQueue::new();
        for i in 0..QUEUE_CAPACITY + 2 {
            let mut text: String<8> = String::new();
            core::fmt::write(&mut text, format_args!("m{}", i)).unwrap();
            queue.send(Severity::Info, &text);
        }
        assert_eq!(queue.len(), QUEUE_CAPACITY);
        assert_eq!(queue.dropped_count(), 2);
        assert_eq!(queue.pop().unwrap().text.as_str(), "m2");
    }

    #[test]
    fn test_long_text_truncated() {
        let mut queue = StatusQueue::new();
        let long = "x".repeat(80);
        queue.send(Severity::Warning, &long);
        assert_eq!(queue.pop().unwrap().text.len(), MAX_STATUS_LEN);
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        // 'é' is two bytes; byte 5 falls inside the third one
        let text = "éééé";
        assert_eq!(truncate(text, 5), "éé");
        assert_eq!(truncate(text, 8), text);
    }

    #[test]
    fn test_drain() {
        let mut queue = StatusQueue::new();
        queue.send(Severity::Info, "a");
        queue.send(Severity::Info, "b");
        let drained: heapless::Vec<StatusMessage, 4> = queue.drain().collect();
        assert_eq!(drained.len(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_unit_sink_discards() {
        StatusSink::send(&mut (), Severity::Critical, "ignored");
    }
}
