use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepairError>;

#[derive(Error, Debug)]
pub enum RepairError {
    #[error("Malformed {command} record: expected at least {expected} arguments, found {found}")]
    MalformedSyscall {
        command: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid input in {file}: {message}")]
    Input { file: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl RepairError {
    pub fn exit_code(&self) -> i32 {
        2
    }
}
