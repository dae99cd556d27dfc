//! Error types for the schema tree

use crate::kind::NodeKind;
use crate::node::SourcePosition;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Structural error: {0}")]
    Structural(#[from] StructuralError),

    #[error("Name collision: '{name}' ({kind}) is already defined in '{parent}'{}", fmt_position(.position))]
    NameCollision {
        name: String,
        parent: String,
        kind: NodeKind,
        position: Option<SourcePosition>,
    },

    #[error("Requested '{name}' is not a child in '{parent}'")]
    NotFound { name: String, parent: String },

    #[error("Clone error: {0}")]
    Clone(Box<Error>),

    #[error("Internal error: {0}")]
    InternalInvariant(String),

    #[error("Invalid outline: {0}")]
    InvalidOutline(String),
}

/// Violations of the tree linkage rules
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralError {
    #[error("abstract node with unset kind cannot be inserted into a tree")]
    UnsetKind,

    #[error("node is already part of a tree")]
    AlreadyParented,

    #[error("node to be added is not atomic, it already has a {0}")]
    NotAtomic(Link),

    #[error("leaf cannot hold child schema nodes")]
    LeafCannotHoldChildren,

    #[error("node does not support collision detection")]
    CollisionDetectionUnsupported,

    #[error("{0} cannot be instantiated by uses")]
    CloneNotSupported(NodeKind),
}

/// A structural link that makes a node non-atomic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Child,
    NextSibling,
    PreviousSibling,
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Link::Child => write!(f, "child"),
            Link::NextSibling => write!(f, "next sibling"),
            Link::PreviousSibling => write!(f, "previous sibling"),
        }
    }
}

fn fmt_position(position: &Option<SourcePosition>) -> String {
    position
        .as_ref()
        .map(|p| format!(" at {}", p))
        .unwrap_or_default()
}

impl Error {
    pub(crate) fn clone_failure(cause: Error) -> Self {
        match cause {
            Error::Clone(_) => cause,
            other => Error::Clone(Box::new(other)),
        }
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, Error::Structural(_))
    }

    pub fn is_collision(&self) -> bool {
        matches!(self, Error::NameCollision { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_clone(&self) -> bool {
        matches!(self, Error::Clone(_))
    }

    /// The failure wrapped by a clone error, if any
    pub fn clone_cause(&self) -> Option<&Error> {
        match self {
            Error::Clone(cause) => Some(cause),
            _ => None,
        }
    }
}
