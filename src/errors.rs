use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("missing required attribute '{key}' for node '{node}'")]
    MissingAttribute { node: String, key: &'static str },

    #[error("cannot aggregate '{key}' of node '{node}': expected a number, found {found}")]
    AggregationType {
        node: String,
        key: &'static str,
        found: &'static str,
    },

    #[error("node index does not belong to this tree")]
    UnknownNode,

    #[error("unrecognized dynamic size mode: {0}")]
    UnknownSizeMode(String),

    #[error("renderer failed: {0}")]
    Render(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
