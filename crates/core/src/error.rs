#[derive(Debug, thiserror::Error)]
pub enum EraError {
    /// A caller broke an operation's contract, e.g. asked for a ranking of zero facilities.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid text: {0}")]
    Text(#[from] era_types::TextError),

    #[error("invalid location: {0}")]
    Geo(#[from] era_types::GeoError),

    #[error("catalog error: {0}")]
    Catalog(#[from] catalog::CatalogError),
}

pub type EraResult<T> = std::result::Result<T, EraError>;
