use archdraw_graphlib::GraphError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown node handle: {id}")]
    UnknownNode { id: String },

    #[error("unknown cluster handle: {id}")]
    UnknownCluster { id: String },

    #[error("node identity `{id}` is already used in this diagram")]
    DuplicateNode { id: String },

    #[error(
        "cannot close cluster {closing}: the innermost open cluster is {}",
        .innermost.as_deref().unwrap_or("<none>")
    )]
    ScopeMismatch {
        closing: String,
        innermost: Option<String>,
    },

    #[error("cluster `{label}` is still open")]
    UnclosedScope { label: String },

    #[error("nesting `{child}` under `{parent}` would create a cluster cycle")]
    ClusterCycle { child: String, parent: String },
}

impl From<GraphError> for Error {
    fn from(value: GraphError) -> Self {
        match value {
            GraphError::MissingNode { id } => Self::UnknownNode { id },
            GraphError::DuplicateNode { id } => Self::DuplicateNode { id },
            GraphError::ParentCycle { child, parent } => Self::ClusterCycle { child, parent },
        }
    }
}
