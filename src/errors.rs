use thiserror::Error;

use crate::arena::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Cycle detected: {child} is {parent} or one of its ancestors")]
    CycleDetected { parent: NodeId, child: NodeId },

    #[error("Node is not expandable: {0}")]
    NotExpandable(NodeId),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to write output: {0}")]
    Output(String),
}

impl From<std::io::Error> for TreeError {
    fn from(e: std::io::Error) -> Self {
        TreeError::Output(e.to_string())
    }
}

pub type TreeResult<T> = Result<T, TreeError>;
