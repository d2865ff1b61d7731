//! event::events
//!
//! Domain events of the content repository core.
//!
//! Events are plain data, serialized as a tagged enum so logs
//! round-trip through JSON. Lifecycle events (stream creation, forking,
//! removal, workspace transitions) name the streams they affect
//! explicitly; node-level events embed the content stream they mutate
//! and only bump that stream's projected version.

use serde::{Deserialize, Serialize};

use crate::dimensionspace::OriginDimensionSpacePoint;
use crate::types::{
    ContentStreamId, NodeAggregateId, NodeName, NodeTypeName, WorkspaceName,
};

/// An event in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A fresh content stream came into existence.
    ContentStreamWasCreated {
        content_stream_id: ContentStreamId,
    },

    /// A content stream was forked off an existing one.
    ContentStreamWasForked {
        new_content_stream_id: ContentStreamId,
        source_content_stream_id: ContentStreamId,
    },

    /// A content stream was removed.
    ContentStreamWasRemoved {
        content_stream_id: ContentStreamId,
    },

    /// The root workspace was created on top of a content stream.
    RootWorkspaceWasCreated {
        workspace_name: WorkspaceName,
        new_content_stream_id: ContentStreamId,
    },

    /// A workspace was created on top of a base workspace.
    WorkspaceWasCreated {
        workspace_name: WorkspaceName,
        base_workspace_name: WorkspaceName,
        new_content_stream_id: ContentStreamId,
    },

    /// All pending changes of a workspace were discarded.
    WorkspaceWasDiscarded {
        workspace_name: WorkspaceName,
        new_content_stream_id: ContentStreamId,
        previous_content_stream_id: ContentStreamId,
    },

    /// Some pending changes of a workspace were discarded.
    WorkspaceWasPartiallyDiscarded {
        workspace_name: WorkspaceName,
        new_content_stream_id: ContentStreamId,
        previous_content_stream_id: ContentStreamId,
    },

    /// Some pending changes of a workspace were published to its base.
    WorkspaceWasPartiallyPublished {
        workspace_name: WorkspaceName,
        new_source_content_stream_id: ContentStreamId,
        previous_source_content_stream_id: ContentStreamId,
    },

    /// All pending changes of a workspace were published to its base.
    WorkspaceWasPublished {
        workspace_name: WorkspaceName,
        new_source_content_stream_id: ContentStreamId,
        previous_source_content_stream_id: ContentStreamId,
    },

    /// A workspace was rebased onto the current state of its base.
    WorkspaceWasRebased {
        workspace_name: WorkspaceName,
        new_content_stream_id: ContentStreamId,
        previous_content_stream_id: ContentStreamId,
    },

    /// A workspace rebase failed; the candidate stream is left for
    /// inspection.
    WorkspaceRebaseFailed {
        workspace_name: WorkspaceName,
        candidate_content_stream_id: ContentStreamId,
    },

    /// A workspace was removed. Not handled by the content stream
    /// projection.
    WorkspaceWasRemoved {
        workspace_name: WorkspaceName,
    },

    /// A node aggregate with its initial node was created.
    NodeAggregateWithNodeWasCreated {
        content_stream_id: ContentStreamId,
        node_aggregate_id: NodeAggregateId,
        node_type_name: NodeTypeName,
        origin_dimension_space_point: OriginDimensionSpacePoint,
        parent_node_aggregate_id: NodeAggregateId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        node_name: Option<NodeName>,
        #[serde(default)]
        initial_property_values: serde_json::Map<String, serde_json::Value>,
    },

    /// Properties of a node were set.
    NodePropertiesWereSet {
        content_stream_id: ContentStreamId,
        node_aggregate_id: NodeAggregateId,
        origin_dimension_space_point: OriginDimensionSpacePoint,
        #[serde(default)]
        property_values: serde_json::Map<String, serde_json::Value>,
    },
}

impl Event {
    /// The serialized tag of this event, for logs and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Event::ContentStreamWasCreated { .. } => "content_stream_was_created",
            Event::ContentStreamWasForked { .. } => "content_stream_was_forked",
            Event::ContentStreamWasRemoved { .. } => "content_stream_was_removed",
            Event::RootWorkspaceWasCreated { .. } => "root_workspace_was_created",
            Event::WorkspaceWasCreated { .. } => "workspace_was_created",
            Event::WorkspaceWasDiscarded { .. } => "workspace_was_discarded",
            Event::WorkspaceWasPartiallyDiscarded { .. } => "workspace_was_partially_discarded",
            Event::WorkspaceWasPartiallyPublished { .. } => "workspace_was_partially_published",
            Event::WorkspaceWasPublished { .. } => "workspace_was_published",
            Event::WorkspaceWasRebased { .. } => "workspace_was_rebased",
            Event::WorkspaceRebaseFailed { .. } => "workspace_rebase_failed",
            Event::WorkspaceWasRemoved { .. } => "workspace_was_removed",
            Event::NodeAggregateWithNodeWasCreated { .. } => {
                "node_aggregate_with_node_was_created"
            }
            Event::NodePropertiesWereSet { .. } => "node_properties_were_set",
        }
    }

    /// The content stream a node-level event mutates. Lifecycle events
    /// name their streams explicitly and return `None` here.
    pub fn embedded_content_stream_id(&self) -> Option<&ContentStreamId> {
        match self {
            Event::NodeAggregateWithNodeWasCreated {
                content_stream_id, ..
            } => Some(content_stream_id),
            Event::NodePropertiesWereSet {
                content_stream_id, ..
            } => Some(content_stream_id),
            _ => None,
        }
    }
}
