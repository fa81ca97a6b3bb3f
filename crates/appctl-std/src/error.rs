use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppctlStdError {
    /// AdhocError comes from the anyhow crate
    #[error(transparent)]
    AdhocError(#[from] anyhow::Error),

    /// This error is thrown when there is an empty file
    #[error("\"{empty_file}\" is an empty file.")]
    EmptyFile {
        /// The empty file path
        empty_file: String,
    },

    /// The file that was asked for does not exist
    #[error("could not find \"{missing_file}\"")]
    MissingFile {
        /// The missing file path
        missing_file: String,
    },
}
