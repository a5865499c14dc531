pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown unit: {tag:?}")]
    UnknownUnit { tag: String },

    #[error("unknown label mode: {value}")]
    UnknownLabelMode { value: String },

    #[error("invalid color {value:?}: expected #rgb or #rrggbb")]
    InvalidColor { value: String },

    #[error("invalid layer JSON: {0}")]
    Json(#[from] serde_json::Error),
}
