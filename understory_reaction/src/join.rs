// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fan-out/fan-in barrier for concurrently running value ramps.
//!
//! A picker transition animates several properties together (for example alpha and
//! translation) and only then signals the engine. [`JoinAll`] tracks the parts of
//! one such transition: the animation system reports each part as it finishes, and
//! the barrier reports exactly once that all of them are done.
//!
//! Cancelling the barrier cancels every part. Completions that arrive afterwards are
//! ignored, so a stale animation callback can never finish a transition that was
//! superseded.
//!
//! ```
//! use understory_reaction::join::{JoinAll, JoinStatus};
//!
//! let mut join = JoinAll::new(["alpha", "offset"]);
//! assert!(!join.complete(1));
//! assert!(join.complete(0));
//! assert_eq!(join.status(), JoinStatus::Finished);
//! // Already finished: further completions are ignored.
//! assert!(!join.complete(0));
//! ```

use alloc::vec::Vec;

/// Lifecycle of a [`JoinAll`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum JoinStatus {
    /// At least one part is still running.
    Running,
    /// Every part completed.
    Finished,
    /// The barrier was cancelled before every part completed.
    Cancelled,
}

#[derive(Clone, Debug, PartialEq)]
struct Part<T> {
    task: T,
    done: bool,
}

/// Barrier over `N` independently running parts.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinAll<T> {
    parts: Vec<Part<T>>,
    remaining: usize,
    status: JoinStatus,
}

impl<T> JoinAll<T> {
    /// Start a barrier over `parts`.
    ///
    /// A barrier with no parts is finished immediately.
    pub fn new(parts: impl IntoIterator<Item = T>) -> Self {
        let parts: Vec<_> = parts
            .into_iter()
            .map(|task| Part { task, done: false })
            .collect();
        let remaining = parts.len();
        Self {
            parts,
            remaining,
            status: if remaining == 0 {
                JoinStatus::Finished
            } else {
                JoinStatus::Running
            },
        }
    }

    /// Current status.
    pub fn status(&self) -> JoinStatus {
        self.status
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` if the barrier has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Number of parts still running. Zero once finished or cancelled.
    pub fn remaining(&self) -> usize {
        match self.status {
            JoinStatus::Running => self.remaining,
            JoinStatus::Finished | JoinStatus::Cancelled => 0,
        }
    }

    /// Part specifications, in start order.
    pub fn parts(&self) -> impl Iterator<Item = &T> {
        self.parts.iter().map(|p| &p.task)
    }

    /// Specification of part `index`.
    pub fn part(&self, index: usize) -> Option<&T> {
        self.parts.get(index).map(|p| &p.task)
    }

    /// Report that part `index` finished.
    ///
    /// Returns `true` exactly once: when this completion finishes the barrier.
    /// Duplicate, out-of-range, and post-cancellation completions return `false`.
    pub fn complete(&mut self, index: usize) -> bool {
        if self.status != JoinStatus::Running {
            return false;
        }
        let Some(part) = self.parts.get_mut(index) else {
            return false;
        };
        if part.done {
            return false;
        }
        part.done = true;
        self.remaining -= 1;
        if self.remaining == 0 {
            self.status = JoinStatus::Finished;
            return true;
        }
        false
    }

    /// Cancel the barrier, returning the indices of parts that were still running.
    ///
    /// The caller must stop those parts. Cancelling a finished or already cancelled
    /// barrier returns nothing.
    pub fn cancel(&mut self) -> Vec<usize> {
        if self.status != JoinStatus::Running {
            return Vec::new();
        }
        self.status = JoinStatus::Cancelled;
        self.parts
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.done)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn finishes_once_when_all_parts_complete() {
        let mut join = JoinAll::new([1, 2, 3]);
        assert_eq!(join.remaining(), 3);
        assert!(!join.complete(2));
        assert!(!join.complete(2));
        assert!(!join.complete(0));
        assert_eq!(join.status(), JoinStatus::Running);
        assert!(join.complete(1));
        assert_eq!(join.status(), JoinStatus::Finished);
        assert_eq!(join.remaining(), 0);
        assert!(!join.complete(1));
    }

    #[test]
    fn empty_barrier_is_finished() {
        let join: JoinAll<u8> = JoinAll::new([]);
        assert_eq!(join.status(), JoinStatus::Finished);
        assert!(join.is_empty());
    }

    #[test]
    fn cancel_stops_running_parts_and_ignores_late_completions() {
        let mut join = JoinAll::new(['a', 'b', 'c']);
        assert!(!join.complete(1));
        assert_eq!(join.cancel(), vec![0, 2]);
        assert_eq!(join.status(), JoinStatus::Cancelled);
        assert!(!join.complete(0));
        assert!(!join.complete(2));
        assert!(join.cancel().is_empty());
        assert_eq!(join.remaining(), 0);
    }

    #[test]
    fn out_of_range_completion_is_ignored() {
        let mut join = JoinAll::new(["only"]);
        assert!(!join.complete(5));
        assert_eq!(join.part(0), Some(&"only"));
        assert!(join.complete(0));
    }
}
