use std::io::Cursor;
use std::path::{Path, PathBuf};

use getset::Getters;
use zip::ZipArchive;

use super::dispatch::{check_status, Dispatcher};
use super::errors::ClientError;
use super::request::RequestOptions;

/// A workflow package that was downloaded and unpacked.
#[derive(Getters, Debug)]
pub struct PackageSaved {
    /// Directory the package was unpacked into.
    #[getset(get = "pub")]
    path: PathBuf,
    /// Number of archive entries written.
    #[getset(get = "pub")]
    num_entries: usize,
}

fn ensure_directory(path: &Path) -> Result<(), ClientError> {
    if !path.is_dir() {
        return Err(ClientError::InvalidTargetDirectory(path.to_path_buf()));
    }

    Ok(())
}

/// Unpack every entry of a zip archive into `dest`, which must be an existing directory.
pub fn extract_package(content: &[u8], dest: &Path) -> Result<PackageSaved, ClientError> {
    ensure_directory(dest)?;

    let mut archive = ZipArchive::new(Cursor::new(content))?;
    archive.extract(dest)?;

    Ok(PackageSaved {
        path: dest.to_path_buf(),
        num_entries: archive.len(),
    })
}

/// Download the package at `endpoint` and unpack it into `save_path`.
/// The directory is checked before anything is sent.
pub(crate) async fn save_package(
    dispatcher: &Dispatcher,
    endpoint: &str,
    save_path: &Path,
) -> Result<PackageSaved, ClientError> {
    ensure_directory(save_path)?;

    let response = check_status(dispatcher.get(endpoint, RequestOptions::new()).await?).await?;
    let content = response.bytes().await?;

    tracing::debug!(num_bytes = content.len(), "Downloaded package");

    let dest = save_path.to_path_buf();

    tokio::task::spawn_blocking(move || extract_package(&content, &dest))
        .await
        .map_err(std::io::Error::other)?
}
