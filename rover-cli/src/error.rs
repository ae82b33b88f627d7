use rover_core::RoverError;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Run(#[from] RoverError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
