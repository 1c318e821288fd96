//! File and store plumbing shared by the `vbrsheet` commands.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use crate::error::{Error, Result};
use crate::scoresheet::{ScoreSheet, ScoreSheetOptions};
use crate::storage::Storage;

/// What [`write_sheet`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A new or changed document was written.
    Written(PathBuf),
    /// The file already held the same document.
    Unchanged(PathBuf),
}

impl WriteOutcome {
    /// Target path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Written(path) | Self::Unchanged(path) => path,
        }
    }
}

/// Read an image file as base64.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn encode_image(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    debug!("Encoding {} ({} bytes)", path.display(), bytes.len());
    Ok(STANDARD.encode(bytes))
}

/// Remarks from the command line, or from a file when one is given.
///
/// # Errors
///
/// Returns an error if the remarks file cannot be read.
pub fn read_remarks(inline: Option<String>, file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => Ok(fs::read_to_string(path)?.trim_end().to_string()),
        None => Ok(inline.unwrap_or_default()),
    }
}

/// Licences and signatures recorded for a match.
///
/// # Errors
///
/// Returns an error if the store cannot be queried.
pub fn stored_options(storage: &Storage, game_id: &str) -> Result<ScoreSheetOptions> {
    Ok(ScoreSheetOptions::default()
        .with_licences(storage.licences(game_id)?)
        .with_signatures(storage.signatures(game_id)?))
}

/// Write `sheet` into `dir`, leaving an identical file untouched.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// read or written.
pub fn write_sheet(dir: &Path, sheet: &ScoreSheet) -> Result<WriteOutcome> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let target = dir.join(&sheet.filename);
    if target.is_file() {
        let existing = fs::read(&target)?;
        if blake3::hash(&existing).to_hex().as_str() == sheet.digest() {
            debug!("{} is up to date", target.display());
            return Ok(WriteOutcome::Unchanged(target));
        }
    }

    fs::write(&target, &sheet.content)?;
    Ok(WriteOutcome::Written(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoresheet::{LicenceRole, Signature, SignatureRole};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "vbr_scoresheet_{name}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn sheet(content: &str) -> ScoreSheet {
        ScoreSheet {
            filename: "Lions_Sharks_01_01_2024.html".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_write_sheet_skips_identical_content() {
        let dir = scratch_dir("write");

        let first = write_sheet(&dir, &sheet("<html></html>")).unwrap();
        assert!(matches!(first, WriteOutcome::Written(_)));
        assert!(first.path().starts_with(&dir));

        let second = write_sheet(&dir, &sheet("<html></html>")).unwrap();
        assert!(matches!(second, WriteOutcome::Unchanged(_)));

        let third = write_sheet(&dir, &sheet("<html>v2</html>")).unwrap();
        assert!(matches!(third, WriteOutcome::Written(_)));
        assert_eq!(fs::read_to_string(third.path()).unwrap(), "<html>v2</html>");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_encode_image() {
        let dir = scratch_dir("image");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("sig.png");
        fs::write(&path, b"PNG").unwrap();

        assert_eq!(encode_image(&path).unwrap(), "UE5H");
        assert!(encode_image(&dir.join("missing.png")).is_err());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_read_remarks_prefers_file() {
        let dir = scratch_dir("remarks");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("remarks.txt");
        fs::write(&path, "late start\nball change\n").unwrap();

        assert_eq!(
            read_remarks(Some("ignored".to_string()), Some(&path)).unwrap(),
            "late start\nball change"
        );
        assert_eq!(read_remarks(Some("inline".to_string()), None).unwrap(), "inline");
        assert_eq!(read_remarks(None, None).unwrap(), "");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_stored_options() {
        let storage = Storage::open_in_memory().unwrap();
        storage.set_licence("m-1", LicenceRole::Scorer, "SC-1").unwrap();
        storage
            .set_signature("m-1", SignatureRole::Referee1, &Signature::new("Ann", None))
            .unwrap();

        let options = stored_options(&storage, "m-1").unwrap();
        assert_eq!(options.licences.get(LicenceRole::Scorer), "SC-1");
        assert_eq!(options.signatures.name(SignatureRole::Referee1), "Ann");
        assert!(options.logo.is_none());
        assert!(options.remarks.is_empty());
    }
}
