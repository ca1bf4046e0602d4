#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Parse(#[from] crate::parse::ParseError),
    #[error("{0}")]
    Overflow(#[from] crate::exact::OverflowError),
    #[error("{0}")]
    Config(#[from] crate::config::ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
