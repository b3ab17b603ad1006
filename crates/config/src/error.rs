use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A plugin section lacks a key it must carry. Fatal at construction
    /// time: the plugin never reaches a usable state.
    #[error("plugin `{plugin}` config is incomplete, missing `{key}`")]
    MissingKey { plugin: String, key: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("unsupported config format: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error(transparent)]
    TomlParse(#[from] toml::de::Error),

    #[error(transparent)]
    TomlWrite(#[from] toml::ser::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{message}")]
    Message { message: String },
}

impl Error {
    #[must_use]
    pub fn missing_key(plugin: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingKey {
            plugin: plugin.into(),
            key: key.into(),
        }
    }

    #[must_use]
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }
}

impl rover_common::FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message { message }
    }
}

rover_common::impl_context!();
