//! Bounded settings queue for `no_std` hosts.
//!
//! UI code (or an interrupt handler) pushes [`SettingChange`]s from any
//! context; the frame loop drains them before the next tick. Backed by
//! `heapless::Deque` behind a `critical-section` mutex.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::settings::SettingChange;

/// Returned when the queue is full, carrying the change that did not fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueFull(pub SettingChange);

/// Fixed-capacity queue of setting changes
pub struct SettingsChannel<const SIZE: usize> {
    queue: Mutex<RefCell<Deque<SettingChange, SIZE>>>,
}

impl<const SIZE: usize> SettingsChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for producers. Any number may coexist.
    pub const fn sender(&self) -> SettingsSender<'_, SIZE> {
        SettingsSender { channel: self }
    }

    /// Handle for the frame loop
    pub const fn receiver(&self) -> SettingsReceiver<'_, SIZE> {
        SettingsReceiver { channel: self }
    }

    fn push(&self, change: SettingChange) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .push_back(change)
                .map_err(QueueFull)
        })
    }

    fn pop(&self) -> Option<SettingChange> {
        critical_section::with(|cs| self.queue.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of queued changes
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.queue.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for SettingsChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub struct SettingsSender<'a, const SIZE: usize> {
    channel: &'a SettingsChannel<SIZE>,
}

impl<const SIZE: usize> SettingsSender<'_, SIZE> {
    /// Queue a change for the next tick
    pub fn try_send(&self, change: SettingChange) -> Result<(), QueueFull> {
        self.channel.push(change)
    }
}

#[derive(Clone, Copy)]
pub struct SettingsReceiver<'a, const SIZE: usize> {
    channel: &'a SettingsChannel<SIZE>,
}

impl<const SIZE: usize> SettingsReceiver<'_, SIZE> {
    /// Take the oldest queued change
    pub fn try_receive(&self) -> Option<SettingChange> {
        self.channel.pop()
    }
}
