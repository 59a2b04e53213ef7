//! JSON-lines vehicle store
//!
//! One `{"vehicle_number": ...}` document per line. A missing file is an
//! empty store; the file and its parent directory are created on first
//! insert.
//!
//! Readers only see whole appends: the file length is captured under the
//! append lock when a read starts, and reading stops there. This holds for
//! writers going through the same `FileVehicleStore`, not for other
//! processes editing the file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader, Lines, Take};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::Vehicle;
use crate::error::StoreError;
use crate::ports::{VehicleStore, VehicleStream};

#[derive(Debug)]
pub struct FileVehicleStore {
    path: PathBuf,
    /// Held for a whole append, and while a reader captures the file length
    append_lock: Mutex<()>,
}

struct LineCursor {
    lines: Lines<BufReader<Take<File>>>,
    line: usize,
    failed: bool,
}

impl FileVehicleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the file limited to the appends completed so far
    async fn open(&self) -> Result<Option<Take<File>>, StoreError> {
        let _guard = self.append_lock.lock().await;

        let file = match File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let len = file.metadata().await?.len();
        Ok(Some(file.take(len)))
    }
}

/// Pull the next non-blank document, stopping for good after the first error
async fn next_vehicle(mut cursor: LineCursor) -> Option<(Result<Vehicle, StoreError>, LineCursor)> {
    if cursor.failed {
        return None;
    }

    loop {
        let line = match cursor.lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return None,
            Err(e) => {
                cursor.failed = true;
                return Some((Err(e.into()), cursor));
            }
        };
        cursor.line += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let parsed = serde_json::from_str::<Vehicle>(trimmed).map_err(|source| StoreError::Parse {
            line: cursor.line,
            source,
        });
        cursor.failed = parsed.is_err();
        return Some((parsed, cursor));
    }
}

#[async_trait]
impl VehicleStore for FileVehicleStore {
    async fn count(&self) -> Result<usize, StoreError> {
        let Some(file) = self.open().await? else {
            return Ok(0);
        };

        let mut lines = BufReader::new(file).lines();
        let mut count = 0;
        while let Some(line) = lines.next_line().await? {
            if !line.trim().is_empty() {
                count += 1;
            }
        }
        Ok(count)
    }

    async fn insert_many(&self, vehicles: Vec<Vehicle>) -> Result<usize, StoreError> {
        if vehicles.is_empty() {
            return Ok(0);
        }

        let mut buffer = Vec::with_capacity(vehicles.len() * 36);
        for vehicle in &vehicles {
            serde_json::to_writer(&mut buffer, vehicle).map_err(StoreError::Encode)?;
            buffer.push(b'\n');
        }

        let _guard = self.append_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&buffer).await?;
        file.flush().await?;

        debug!(
            path = %self.path.display(),
            count = vehicles.len(),
            "Appended vehicles"
        );
        Ok(vehicles.len())
    }

    async fn stream(&self) -> Result<VehicleStream, StoreError> {
        let Some(file) = self.open().await? else {
            return Ok(stream::empty().boxed());
        };

        let cursor = LineCursor {
            lines: BufReader::new(file).lines(),
            line: 0,
            failed: false,
        };
        Ok(stream::unfold(cursor, next_vehicle).boxed())
    }
}
