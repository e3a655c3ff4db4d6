//! JSON-file-based store backend.
//!
//! Persists the whole reservation collection as a single JSON slot
//! (`reservations.json`) under a configurable directory (default:
//! `$XDG_DATA_HOME/hotelbook-rs/`).

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::error::{HotelBookError, Result};
use crate::models::{Reservation, ReservationId, ReservationStatus};

/// Application name used for the XDG data directory.
const APP_NAME: &str = "hotelbook-rs";

/// File name of the single reservation slot.
const RESERVATIONS_FILE: &str = "reservations.json";
/// Sentinel file used for cross-process file locking.
const LOCK_FILE: &str = "store.lock";

/// File-backed store that persists the reservation collection as JSON.
///
/// The collection lives in one slot: every mutation reads the whole
/// collection, modifies it, and atomically rewrites it
/// (write-to-tmp then rename).
///
/// # Concurrency
///
/// Thread safety within a single process is provided by an in-process
/// [`Mutex`]. Cross-process safety is achieved via an advisory file lock
/// on `store.lock` (using [`std::fs::File::lock`] /
/// [`std::fs::File::lock_shared`]). Read operations acquire a shared
/// lock, write operations an exclusive lock, so concurrent admin
/// sessions serialize their read-modify-write cycles instead of racing
/// last-writer-wins.
///
/// # File layout
///
/// ```text
/// <dir>/
///   store.lock          (cross-process lock sentinel)
///   reservations.json
/// ```
#[derive(Debug)]
pub struct FileStore {
    /// Directory containing the slot and the lock sentinel.
    dir: PathBuf,
    /// Mutex serializing concurrent in-process access.
    lock: Mutex<()>,
    /// Sentinel file for cross-process advisory locking.
    lock_file: fs::File,
}

impl FileStore {
    /// Creates a new file store rooted at the given directory.
    ///
    /// Creates the directory (and parents) if it does not exist. Also
    /// opens (or creates) the `store.lock` sentinel file used for
    /// cross-process advisory locking.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the lock
    /// file cannot be opened.
    #[inline]
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).map_err(store_io_error)?;
        let lock_file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(dir.join(LOCK_FILE))
            .map_err(store_io_error)?;
        Ok(Self {
            dir,
            lock: Mutex::new(()),
            lock_file,
        })
    }

    /// Returns the default XDG-compliant data directory for this
    /// application.
    ///
    /// On Linux: `$XDG_DATA_HOME/hotelbook-rs/` (typically
    /// `~/.local/share/hotelbook-rs/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be
    /// determined.
    #[inline]
    pub fn default_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|data_path| data_path.join(APP_NAME))
            .ok_or_else(|| {
                HotelBookError::Storage("could not determine platform data directory".into())
            })
    }

    // ── Private helpers ─────────────────────────────────────────────

    /// Returns the full path for a given file name.
    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Acquires an in-process mutex guard and a shared (read) file lock,
    /// executes `op`, then releases the file lock.
    fn with_shared_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        self.lock_file.lock_shared().map_err(store_io_error)?;
        let result = op();
        // Only surface the unlock error when the operation succeeded;
        // otherwise the original error is more useful.
        if let Err(err) = self.lock_file.unlock()
            && result.is_ok()
        {
            return Err(store_io_error(err));
        }
        result
    }

    /// Acquires an in-process mutex guard and an exclusive (write) file
    /// lock, executes `op`, then releases the file lock.
    fn with_exclusive_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        self.lock_file.lock().map_err(store_io_error)?;
        let result = op();
        if let Err(err) = self.lock_file.unlock()
            && result.is_ok()
        {
            return Err(store_io_error(err));
        }
        result
    }

    /// Reads and deserializes the slot. Returns `None` if the slot has
    /// never been written; corrupted contents are an error.
    fn read_slot(&self) -> Result<Option<Vec<Reservation>>> {
        let path = self.path(RESERVATIONS_FILE);
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map(Some)
                .map_err(HotelBookError::from),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(store_io_error(err)),
        }
    }

    /// Atomically writes the serialized slot (write-to-tmp then rename).
    fn write_slot(&self, entries: &[Reservation]) -> Result<()> {
        let path = self.path(RESERVATIONS_FILE);
        let tmp_path = self.path(&format!("{RESERVATIONS_FILE}.tmp"));
        let json = serde_json::to_string_pretty(entries).map_err(HotelBookError::from)?;
        fs::write(&tmp_path, json).map_err(store_io_error)?;
        fs::rename(&tmp_path, &path).map_err(store_io_error)?;
        Ok(())
    }

    // ── Operation bodies (shared by both trait impls) ───────────────

    /// Seeds the slot if it has never been written.
    fn initialize_slot(&self) -> Result<bool> {
        self.with_exclusive_lock(|| {
            if self.read_slot()?.is_some() {
                Ok(false)
            } else {
                self.write_slot(&super::seed_collection())?;
                tracing::debug!(dir = %self.dir.display(), "seeded reservation slot");
                Ok(true)
            }
        })
    }

    /// Returns the collection, empty when the slot is absent.
    fn list_all(&self) -> Result<Vec<Reservation>> {
        self.with_shared_lock(|| Ok(self.read_slot()?.unwrap_or_default()))
    }

    /// Finds the first reservation with the given id.
    fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>> {
        self.with_shared_lock(|| {
            Ok(self
                .read_slot()?
                .and_then(|entries| entries.into_iter().find(|entry| entry.id == id)))
        })
    }

    /// Validates and appends a reservation, materializing an absent slot
    /// without seeding it.
    fn append(&self, reservation: Reservation) -> Result<()> {
        self.with_exclusive_lock(|| {
            let mut entries = self.read_slot()?.unwrap_or_default();
            super::validate_new(&entries, &reservation)?;
            entries.push(reservation);
            self.write_slot(&entries)
        })
    }

    /// Sets the status of the first matching reservation and persists.
    fn set_status(&self, id: ReservationId, status: ReservationStatus) -> Result<bool> {
        self.with_exclusive_lock(|| {
            let Some(mut entries) = self.read_slot()? else {
                return Ok(false);
            };
            let Some(entry) = entries.iter_mut().find(|entry| entry.id == id) else {
                return Ok(false);
            };
            entry.status = status;
            self.write_slot(&entries)?;
            Ok(true)
        })
    }

    /// Removes every reservation with the given id and persists.
    fn remove_by_id(&self, id: ReservationId) -> Result<bool> {
        self.with_exclusive_lock(|| {
            let Some(mut entries) = self.read_slot()? else {
                return Ok(false);
            };
            let before = entries.len();
            entries.retain(|entry| entry.id != id);
            if entries.len() == before {
                return Ok(false);
            }
            self.write_slot(&entries)?;
            Ok(true)
        })
    }

    /// Deletes the slot file, resetting to the never-written state.
    ///
    /// The `store.lock` sentinel is intentionally preserved; it is
    /// infrastructure, not data.
    fn reset(&self) -> Result<()> {
        self.with_exclusive_lock(|| {
            match fs::remove_file(self.path(RESERVATIONS_FILE)) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => return Err(store_io_error(err)),
            }
            Ok(())
        })
    }
}

// ── Free-standing helpers ───────────────────────────────────────────────

/// Wraps an I/O error into a [`HotelBookError::Storage`].
fn store_io_error(err: std::io::Error) -> HotelBookError {
    HotelBookError::Storage(Box::new(err))
}

/// Wraps a mutex poison error into a [`HotelBookError::Storage`].
fn lock_poison_error<T>(err: &std::sync::PoisonError<T>) -> HotelBookError {
    HotelBookError::Storage(err.to_string().into())
}

// ── BlockingReservationStore implementation ─────────────────────────────

#[cfg(feature = "blocking")]
impl super::BlockingReservationStore for FileStore {
    #[inline]
    fn initialize(&self) -> Result<bool> {
        self.initialize_slot()
    }

    #[inline]
    fn reservations(&self) -> Result<Vec<Reservation>> {
        self.list_all()
    }

    #[inline]
    fn get(&self, id: ReservationId) -> Result<Option<Reservation>> {
        self.find_by_id(id)
    }

    #[inline]
    fn create(&self, reservation: Reservation) -> Result<()> {
        self.append(reservation)
    }

    #[inline]
    fn update_status(&self, id: ReservationId, status: ReservationStatus) -> Result<bool> {
        self.set_status(id, status)
    }

    #[inline]
    fn delete(&self, id: ReservationId) -> Result<bool> {
        self.remove_by_id(id)
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.reset()
    }
}

// ── ReservationStore (async) implementation ─────────────────────────────

#[cfg(feature = "async")]
impl super::ReservationStore for FileStore {
    #[inline]
    fn initialize(&self) -> impl Future<Output = Result<bool>> + Send {
        core::future::ready(self.initialize_slot())
    }

    #[inline]
    fn reservations(&self) -> impl Future<Output = Result<Vec<Reservation>>> + Send {
        core::future::ready(self.list_all())
    }

    #[inline]
    fn get(&self, id: ReservationId) -> impl Future<Output = Result<Option<Reservation>>> + Send {
        core::future::ready(self.find_by_id(id))
    }

    #[inline]
    fn create(&self, reservation: Reservation) -> impl Future<Output = Result<()>> + Send {
        core::future::ready(self.append(reservation))
    }

    #[inline]
    fn update_status(
        &self,
        id: ReservationId,
        status: ReservationStatus,
    ) -> impl Future<Output = Result<bool>> + Send {
        core::future::ready(self.set_status(id, status))
    }

    #[inline]
    fn delete(&self, id: ReservationId) -> impl Future<Output = Result<bool>> + Send {
        core::future::ready(self.remove_by_id(id))
    }

    #[inline]
    fn clear(&self) -> impl Future<Output = Result<()>> + Send {
        core::future::ready(self.reset())
    }
}
