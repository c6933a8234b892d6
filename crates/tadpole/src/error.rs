#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown layout mode: {mode} (expected one of: arc, circular, hierarchy)")]
    UnknownLayoutMode { mode: String },

    #[error("{buffer} buffer needs {count} entries but 16-bit indices below the restart index address at most {limit}")]
    IndexOverflow {
        buffer: &'static str,
        count: usize,
        limit: usize,
    },

    #[error("hierarchy layout requested but no layered layouter is configured")]
    MissingLayeredLayouter,

    #[error("layered layouter did not place vertex {id}")]
    MissingVertex { id: String },

    #[error("edge {u} -> {v} references a vertex missing from the layout")]
    MissingEndpoint { u: String, v: String },

    #[error("invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Graph(#[from] tadpole_graphlib::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
