//! Deferred effects keyed by expiry time
//!
//! Timed ability effects are queued here and fired at tick boundaries, never
//! in the middle of a tick. Entries due at the same instant fire in the order
//! they were scheduled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

/// What happens when a timer expires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEffect {
    /// Time warp ends: restore player and enemy speeds
    TimeWarpExpired,
    /// Hyper jump becomes available again
    HyperJumpRecharged,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PendingTimer {
    expires_at: f64,
    seq: u64,
    effect: TimerEffect,
}

impl PartialEq for PendingTimer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PendingTimer {}

impl PartialOrd for PendingTimer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingTimer {
    // Reversed so the max-heap pops the earliest expiry first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .expires_at
            .total_cmp(&self.expires_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of pending effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerQueue {
    pending: BinaryHeap<PendingTimer>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `effect` to fire once the clock reaches `now + delay`
    pub fn schedule(&mut self, now: f64, delay: f32, effect: TimerEffect) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(PendingTimer {
            expires_at: now + f64::from(delay),
            seq,
            effect,
        });
    }

    /// Pop every effect due at or before `now`, earliest first
    pub fn pop_due(&mut self, now: f64) -> Vec<TimerEffect> {
        let mut due = Vec::new();
        while let Some(next) = self.pending.peek() {
            if next.expires_at > now {
                break;
            }
            if let Some(timer) = self.pending.pop() {
                due.push(timer.effect);
            }
        }
        due
    }

    /// Seconds until the next pending `effect` fires, if one is queued
    pub fn remaining(&self, now: f64, effect: TimerEffect) -> Option<f32> {
        self.pending
            .iter()
            .filter(|t| t.effect == effect)
            .map(|t| (t.expires_at - now).max(0.0) as f32)
            .min_by(|a, b| a.total_cmp(b))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
