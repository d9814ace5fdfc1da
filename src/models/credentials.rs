use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::error::{GraderError, Result};

/// File name of the per-user credential file, relative to the home directory.
pub const CREDENTIAL_FILE_NAME: &str = ".canvasgrader";

/// Permission bits a credential file may carry: owner read/write.
#[cfg(unix)]
const ALLOWED_MODE: u32 = 0o600;

/// Strategy for obtaining the bearer token the client authenticates with.
///
/// Resolution happens once, when the client is built. The token is then held
/// in memory for the life of the client and never written back anywhere.
pub trait CredentialSource {
    fn resolve_credential(&self) -> Result<SecretString>;
}

/// A key handed over directly by the caller.
#[derive(Clone)]
pub struct ExplicitKey {
    api_key: SecretString,
}

impl ExplicitKey {
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl CredentialSource for ExplicitKey {
    fn resolve_credential(&self) -> Result<SecretString> {
        let trimmed = self.api_key.expose_secret().trim();
        if trimmed.is_empty() {
            return Err(GraderError::Config(
                "API key is empty; pass a non-empty key or store one in ~/.canvasgrader".into(),
            ));
        }
        Ok(SecretString::from(trimmed.to_owned()))
    }
}

/// A key stored in a plain-text file that only its owner may read.
///
/// The file holds a single token; surrounding whitespace and newlines are
/// dropped. The file is rejected before its contents are used if any group or
/// other permission bit is set, or if the owner has execute permission.
#[derive(Debug, Clone)]
pub struct CredentialFile {
    path: PathBuf,
}

impl CredentialFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.canvasgrader` for the invoking user.
    pub fn default_location() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            GraderError::Config(
                "could not determine home directory; pass an API key explicitly".into(),
            )
        })?;
        Ok(Self::new(home.join(CREDENTIAL_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn missing(&self) -> GraderError {
        GraderError::Config(format!(
            "no API key found; provide one as an argument or in {}",
            self.path.display()
        ))
    }

    #[cfg(unix)]
    fn check_permissions(&self, metadata: &fs::Metadata) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let mode = metadata.permissions().mode() & 0o777;
        if mode & !ALLOWED_MODE != 0 {
            return Err(GraderError::Config(format!(
                "{} has mode {:o}; tighten privileges to 600 or less",
                self.path.display(),
                mode
            )));
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn check_permissions(&self, _metadata: &fs::Metadata) -> Result<()> {
        Ok(())
    }
}

impl CredentialSource for CredentialFile {
    fn resolve_credential(&self) -> Result<SecretString> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(self.missing()),
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_file() {
            return Err(self.missing());
        }
        self.check_permissions(&metadata)?;

        debug!(path = %self.path.display(), "Reading API key from credential file");
        let contents = SecretString::from(fs::read_to_string(&self.path)?);
        let key = contents.expose_secret().trim();
        if key.is_empty() {
            return Err(GraderError::Config(format!(
                "{} is empty; store the API key in it",
                self.path.display()
            )));
        }
        Ok(SecretString::from(key.to_owned()))
    }
}
