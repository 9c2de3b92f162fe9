use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Authentication failed: check the account credentials in your sync settings")]
    Unauthorized,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed front matter in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("{op}: {source}")]
    Vault {
        op: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),

    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<SyncError>,
    },
}

pub type Result<T> = std::result::Result<T, SyncError>;

impl SyncError {
    /// Wraps a filesystem failure with the vault operation that was attempted.
    pub fn vault(op: impl Into<String>, source: std::io::Error) -> Self {
        SyncError::Vault {
            op: op.into(),
            source,
        }
    }

    /// True if the failure is a credential rejection, even through context wrapping.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            SyncError::Unauthorized => true,
            SyncError::Context { source, .. } => source.is_unauthorized(),
            _ => false,
        }
    }
}

pub trait ResultExt<T> {
    /// Re-signals the failure with the higher-level operation in progress.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| SyncError::Context {
            context: context.into(),
            source: Box::new(e),
        })
    }
}
