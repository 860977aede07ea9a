//! File-backed cart store: one JSON document per user.

use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use fs4::fs_std::FileExt;
use jiff::Timestamp;
use tempfile::NamedTempFile;
use tokio::task;

use pizzeria::{carts::Cart, fingerprint::ToppingOrder};

use crate::domain::carts::records::{StoredCart, StoredCartDocument, UserUuid};

use super::{CartsRepository, RepositoryError, next_revision};

/// Stores each cart at `<dir>/<user>.json`.
///
/// Creates and saves hold an exclusive lock on `<dir>/<user>.lock` from the revision check
/// until the new document is in place, so writers in other processes queue behind each other.
/// Documents are written to a uniquely named temporary file and renamed into place; readers
/// never see a partial document and take no lock.
#[derive(Debug, Clone)]
pub struct FileCartsRepository {
    dir: PathBuf,
    topping_order: ToppingOrder,
}

impl FileCartsRepository {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, topping_order: ToppingOrder) -> Self {
        Self {
            dir: dir.into(),
            topping_order,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn blocking<T, F>(&self, run: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&Path) -> Result<T, RepositoryError> + Send + 'static,
        T: Send + 'static,
    {
        let dir = self.dir.clone();

        task::spawn_blocking(move || run(&dir))
            .await
            .map_err(|error| RepositoryError::Io(io::Error::other(error)))?
    }

    fn restore(&self, document: StoredCartDocument) -> Result<StoredCart, RepositoryError> {
        StoredCart::from_document(self.topping_order, document)
            .map_err(RepositoryError::InvalidDocument)
    }
}

fn document_path(dir: &Path, user: UserUuid) -> PathBuf {
    dir.join(format!("{user}.json"))
}

/// Open and exclusively lock the user's lock file. The lock is released when the file closes.
fn lock(dir: &Path, user: UserUuid) -> Result<File, RepositoryError> {
    fs::create_dir_all(dir)?;

    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(dir.join(format!("{user}.lock")))?;

    FileExt::lock_exclusive(&file)?;

    Ok(file)
}

fn read(dir: &Path, user: UserUuid) -> Result<StoredCartDocument, RepositoryError> {
    match fs::read(document_path(dir, user)) {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(error) if error.kind() == ErrorKind::NotFound => Err(RepositoryError::NotFound),
        Err(error) => Err(error.into()),
    }
}

/// Write a document to a fresh temporary file in `dir`, ready to be persisted.
fn stage(dir: &Path, document: &StoredCartDocument) -> Result<NamedTempFile, RepositoryError> {
    let temp = NamedTempFile::new_in(dir)?;

    {
        let mut writer = BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(&mut writer, document)?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;

    Ok(temp)
}

#[async_trait]
impl CartsRepository for FileCartsRepository {
    async fn create_cart(&self, user: UserUuid) -> Result<StoredCart, RepositoryError> {
        let document = self
            .blocking(move |dir| {
                let _lock = lock(dir, user)?;
                let document = StoredCartDocument::empty(user, Timestamp::now());

                stage(dir, &document)?
                    .persist_noclobber(document_path(dir, user))
                    .map_err(|error| match error.error.kind() {
                        ErrorKind::AlreadyExists => RepositoryError::AlreadyExists,
                        _ => RepositoryError::Io(error.error),
                    })?;

                Ok(document)
            })
            .await?;

        self.restore(document)
    }

    async fn load_cart(&self, user: UserUuid) -> Result<StoredCart, RepositoryError> {
        let document = self.blocking(move |dir| read(dir, user)).await?;

        self.restore(document)
    }

    async fn save_cart(
        &self,
        user: UserUuid,
        cart: Cart,
        expected_revision: u64,
    ) -> Result<StoredCart, RepositoryError> {
        let next = self
            .blocking(move |dir| {
                let _lock = lock(dir, user)?;
                let current = read(dir, user)?;
                let next = next_revision(&current, &cart, expected_revision)?;

                stage(dir, &next)?
                    .persist(document_path(dir, user))
                    .map_err(|error| RepositoryError::Io(error.error))?;

                Ok(next)
            })
            .await?;

        self.restore(next)
    }
}
