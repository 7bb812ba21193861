//! One-shot events from view-models to the screen that owns them
//!
//! A view-model pushes an event when a command finishes; the app takes it on
//! the next loop iteration. Taking removes the event, so each one is handled
//! exactly once.

use std::collections::VecDeque;

#[derive(Debug)]
pub struct EventQueue<E> {
    pending: VecDeque<E>,
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    pub fn emit(&mut self, event: E) {
        self.pending.push_back(event);
    }

    /// Oldest pending event, if any
    pub fn take(&mut self) -> Option<E> {
        self.pending.pop_front()
    }

    /// All pending events, oldest first
    pub fn drain(&mut self) -> Vec<E> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}
