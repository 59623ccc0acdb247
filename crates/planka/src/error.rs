#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error(
        "Missing credentials ({missing}). Set PLANKA_URL, PLANKA_USERNAME, and PLANKA_PASSWORD or run `planka login --url ... --username ... --password ...` to write {path}."
    )]
    MissingCredentials { path: String, missing: String },

    #[error("Could not write {path}: {reason}")]
    CredentialStore { path: String, reason: String },

    #[error("{0}")]
    InvalidInput(String),
}
