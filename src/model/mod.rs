use thiserror::Error;

pub mod module;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error reading module descriptor: {0}")]
    IO(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Module descriptor has an empty name")]
    EmptyName,
}
