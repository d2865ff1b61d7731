//! projection::finder
//!
//! Read-side queries over the projected content stream rows. The
//! finder borrows the projection's row map, so it is a cheap view
//! valid for as long as the projection is not mutated.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::event::Version;
use crate::projection::state::{ContentStreamRecord, ContentStreamState};
use crate::types::ContentStreamId;

/// Query interface over projected content stream rows.
#[derive(Debug, Clone, Copy)]
pub struct ContentStreamFinder<'a> {
    rows: &'a BTreeMap<ContentStreamId, ContentStreamRecord>,
}

impl<'a> ContentStreamFinder<'a> {
    pub fn new(rows: &'a BTreeMap<ContentStreamId, ContentStreamRecord>) -> Self {
        ContentStreamFinder { rows }
    }

    /// All known content stream ids, removed ones included.
    pub fn find_all_identifiers(&self) -> Vec<ContentStreamId> {
        self.rows.keys().cloned().collect()
    }

    /// Streams no workspace uses anymore and rebase casualties, minus
    /// anything already marked removed.
    pub fn find_unused_content_streams(&self) -> Vec<ContentStreamId> {
        self.rows
            .values()
            .filter(|row| {
                !row.removed
                    && matches!(
                        row.state,
                        ContentStreamState::NoLongerInUse | ContentStreamState::RebaseError
                    )
            })
            .map(|row| row.content_stream_id.clone())
            .collect()
    }

    pub fn find_state_for_content_stream(
        &self,
        content_stream_id: &ContentStreamId,
    ) -> Option<ContentStreamState> {
        self.rows.get(content_stream_id).map(|row| row.state)
    }

    pub fn find_version_for_content_stream(
        &self,
        content_stream_id: &ContentStreamId,
    ) -> Option<Version> {
        self.rows.get(content_stream_id).map(|row| row.version)
    }

    pub fn has_content_stream(&self, content_stream_id: &ContentStreamId) -> bool {
        self.rows.contains_key(content_stream_id)
    }

    /// Removed streams that are safe to prune.
    ///
    /// A stream in use by a workspace keeps its whole fork ancestry
    /// alive, so the reachable set is the transitive closure from
    /// every `IN_USE_BY_WORKSPACE` row following `source` edges
    /// backward. A removed stream is reported only when it is outside
    /// that set. The visited set bounds the walk even if source edges
    /// were to form a cycle.
    pub fn find_unused_and_removed_content_streams(&self) -> Vec<ContentStreamId> {
        let mut reachable: BTreeSet<&ContentStreamId> = BTreeSet::new();
        let mut queue: VecDeque<&ContentStreamId> = self
            .rows
            .values()
            .filter(|row| !row.removed && row.state == ContentStreamState::InUseByWorkspace)
            .map(|row| &row.content_stream_id)
            .collect();

        while let Some(id) = queue.pop_front() {
            if !reachable.insert(id) {
                continue;
            }
            if let Some(source) = self
                .rows
                .get(id)
                .and_then(|row| row.source_content_stream_id.as_ref())
            {
                queue.push_back(source);
            }
        }

        self.rows
            .values()
            .filter(|row| row.removed && !reachable.contains(&row.content_stream_id))
            .map(|row| row.content_stream_id.clone())
            .collect()
    }
}
