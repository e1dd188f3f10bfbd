use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Could not read image `{name}`: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Could not compress image `{name}`: {source}")]
    Encode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Compressing `{name}` produced no data")]
    EmptyOutput { name: String },

    #[error("Compression of `{name}` was interrupted")]
    Interrupted { name: String },
}

impl MediaError {
    pub fn file_name(&self) -> &str {
        match self {
            MediaError::Decode { name, .. }
            | MediaError::Encode { name, .. }
            | MediaError::EmptyOutput { name }
            | MediaError::Interrupted { name } => name,
        }
    }
}
