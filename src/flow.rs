//! Collection mapping selection flow
//!
//! A two-state machine that holds a candidate directory while the user picks
//! between the `root` and `parent` collection mappings:
//! - `Idle`: nothing pending
//! - `AwaitingChoice`: one candidate stashed until the user decides
//!
//! Candidates arriving from batch drops queue behind the pending one and are
//! promoted FIFO, so dropping several nested directories at once loses none
//! of them. A pending choice never times out.

use std::collections::VecDeque;

use crate::models::watch::CollectionMapping;
use crate::WatchError;

/// A directory path waiting on a user decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub folder_path: String,
}

/// State of the selection flow
#[derive(Debug, Clone, PartialEq, Eq)]
enum FlowState {
    /// No candidate pending
    Idle,
    /// A candidate is held until the user picks a mapping
    AwaitingChoice(Candidate),
}

/// Mapping selection state machine
pub struct MappingSelectionFlow {
    state: FlowState,
    queue: VecDeque<Candidate>,
}

impl Default for MappingSelectionFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl MappingSelectionFlow {
    pub fn new() -> Self {
        Self {
            state: FlowState::Idle,
            queue: VecDeque::new(),
        }
    }

    /// The candidate awaiting a choice, if any
    ///
    /// This is the "choice needed" signal surfaced to the UI.
    pub fn pending(&self) -> Option<&str> {
        match &self.state {
            FlowState::AwaitingChoice(candidate) => Some(&candidate.folder_path),
            FlowState::Idle => None,
        }
    }

    /// Number of candidates queued behind the pending one
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Claim the flow for a single candidate
    ///
    /// Fails with `FlowBusy` while another choice is pending; batch intake
    /// should use `enqueue` instead.
    pub fn submit(&mut self, folder_path: &str) -> Result<(), WatchError> {
        if self.pending().is_some() {
            return Err(WatchError::FlowBusy);
        }

        self.state = FlowState::AwaitingChoice(Candidate {
            folder_path: folder_path.to_string(),
        });

        Ok(())
    }

    /// Queue a candidate from a batch drop; never rejected
    pub fn enqueue(&mut self, folder_path: &str) {
        self.queue.push_back(Candidate {
            folder_path: folder_path.to_string(),
        });
    }

    /// Promote the next queued candidate when idle
    ///
    /// Returns the now-pending path so the caller can raise the choice
    /// prompt, or `None` when busy or drained.
    pub fn begin_next(&mut self) -> Option<&str> {
        if matches!(self.state, FlowState::AwaitingChoice(_)) {
            return None;
        }

        let next = self.queue.pop_front()?;
        self.state = FlowState::AwaitingChoice(next);
        self.pending()
    }

    /// Resolve the pending candidate with the user's mapping choice
    ///
    /// Transitions back to `Idle` and hands the stashed path plus the chosen
    /// mapping to the caller for committing.
    pub fn resolve(
        &mut self,
        mapping: CollectionMapping,
    ) -> Result<(String, CollectionMapping), WatchError> {
        match std::mem::replace(&mut self.state, FlowState::Idle) {
            FlowState::AwaitingChoice(candidate) => Ok((candidate.folder_path, mapping)),
            FlowState::Idle => Err(WatchError::NoPendingChoice),
        }
    }

    /// Discard the pending candidate without committing
    pub fn cancel(&mut self) -> Result<String, WatchError> {
        match std::mem::replace(&mut self.state, FlowState::Idle) {
            FlowState::AwaitingChoice(candidate) => Ok(candidate.folder_path),
            FlowState::Idle => Err(WatchError::NoPendingChoice),
        }
    }
}
