use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Missing required column in {table} table: no {field} column (tried: {candidates})")]
    MissingColumn {
        table: String,
        field: String,
        candidates: String,
    },

    #[error("Empty input: {0} table has no usable rows")]
    EmptyInput(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<csv::Error> for PipelineError {
    fn from(e: csv::Error) -> Self {
        PipelineError::Csv(e.to_string())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(e: std::io::Error) -> Self {
        PipelineError::Io(e.to_string())
    }
}
