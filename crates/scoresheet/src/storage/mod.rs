//! Per-match licences and signatures.
//!
//! The referee app collects these before the sheet is rendered; the store
//! keeps them between `vbrsheet` invocations, keyed by match id and role.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::scoresheet::{LicenceRole, Licences, Signature, SignatureRole, Signatures};

/// `SQLite`-backed store for licences and signatures.
#[derive(Debug)]
pub struct Storage {
    path: PathBuf,
    conn: Connection,
}

impl Storage {
    /// Open or create the store at `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or database cannot be created, or
    /// the schema cannot be brought up to date.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening licence store at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Licence store ready at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Open a throwaway in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let path = PathBuf::from(":memory:");
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self { path, conn })
    }

    /// Path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record or replace a licence.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn set_licence(&self, game_id: &str, role: LicenceRole, value: &str) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO licences (game_id, role, value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (game_id, role)
            DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![game_id, role.key(), value, Utc::now().to_rfc3339()],
        )?;
        debug!("Stored {} licence for game {}", role, game_id);
        Ok(())
    }

    /// Licence for one role, empty when none was recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn licence(&self, game_id: &str, role: LicenceRole) -> Result<String> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM licences WHERE game_id = ?1 AND role = ?2",
                params![game_id, role.key()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.unwrap_or_default())
    }

    /// All licences recorded for a match.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn licences(&self, game_id: &str) -> Result<Licences> {
        let mut stmt = self
            .conn
            .prepare("SELECT role, value FROM licences WHERE game_id = ?1")?;
        let rows = stmt
            .query_map([game_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut licences = Licences::default();
        for (key, value) in rows {
            match key.parse::<LicenceRole>() {
                Ok(role) => licences.insert(role, value),
                Err(_) => warn!("Skipping licence with unknown role {} for game {}", key, game_id),
            }
        }
        Ok(licences)
    }

    /// Record or replace a signature.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn set_signature(
        &self,
        game_id: &str,
        role: SignatureRole,
        signature: &Signature,
    ) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO signatures (game_id, role, name, image, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (game_id, role)
            DO UPDATE SET name = excluded.name, image = excluded.image,
                          updated_at = excluded.updated_at
            ",
            params![
                game_id,
                role.key(),
                signature.name,
                signature.image,
                Utc::now().to_rfc3339(),
            ],
        )?;
        debug!("Stored {} signature for game {}", role, game_id);
        Ok(())
    }

    /// Signature for one role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn signature(&self, game_id: &str, role: SignatureRole) -> Result<Option<Signature>> {
        let signature = self
            .conn
            .query_row(
                "SELECT name, image FROM signatures WHERE game_id = ?1 AND role = ?2",
                params![game_id, role.key()],
                |row| Ok(Signature::new(row.get::<_, String>(0)?, row.get(1)?)),
            )
            .optional()?;
        Ok(signature)
    }

    /// All signatures recorded for a match.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn signatures(&self, game_id: &str) -> Result<Signatures> {
        let mut stmt = self
            .conn
            .prepare("SELECT role, name, image FROM signatures WHERE game_id = ?1")?;
        let rows = stmt
            .query_map([game_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    Signature::new(row.get::<_, String>(1)?, row.get(2)?),
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut signatures = Signatures::default();
        for (key, signature) in rows {
            match key.parse::<SignatureRole>() {
                Ok(role) => signatures.insert(role, signature),
                Err(_) => warn!(
                    "Skipping signature with unknown role {} for game {}",
                    key, game_id
                ),
            }
        }
        Ok(signatures)
    }

    /// Forget everything recorded for a match. Returns the rows removed.
    ///
    /// Both tables are cleared in one transaction; on error nothing is
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn clear_game(&self, game_id: &str) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let licences = tx.execute("DELETE FROM licences WHERE game_id = ?1", [game_id])?;
        let signatures = tx.execute("DELETE FROM signatures WHERE game_id = ?1", [game_id])?;
        tx.commit()?;

        let removed = licences + signatures;
        if removed > 0 {
            info!("Cleared {} entries for game {}", removed, game_id);
        }
        Ok(removed)
    }

    /// Store statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let licences: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM licences", [], |row| row.get(0))?;
        let signatures: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM signatures", [], |row| row.get(0))?;
        let games: i64 = self.conn.query_row(
            r"
            SELECT COUNT(*) FROM (
                SELECT game_id FROM licences UNION SELECT game_id FROM signatures
            )
            ",
            [],
            |row| row.get(0),
        )?;

        let last: Option<String> = self.conn.query_row(
            r"
            SELECT MAX(updated_at) FROM (
                SELECT updated_at FROM licences UNION ALL SELECT updated_at FROM signatures
            )
            ",
            [],
            |row| row.get(0),
        )?;
        let last_updated = last
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let db_size_bytes = if self.path.as_os_str() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map_or(0, |m| m.len())
        };

        Ok(StorageStats {
            games,
            licences,
            signatures,
            last_updated,
            db_size_bytes,
        })
    }
}

/// Counts reported by [`Storage::stats`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Distinct matches with at least one entry.
    pub games: i64,
    /// Licence rows.
    pub licences: i64,
    /// Signature rows.
    pub signatures: i64,
    /// Most recent write.
    pub last_updated: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
