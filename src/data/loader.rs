use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::error::{DatasetError, Result};

use super::integer::is_integer;
use super::labels::LabelTable;
use super::model::{ImageRef, Subject, LABELS_FILE, MODALITIES, TEST_DIR, TRAIN_DIR};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Index every subject of one split of the challenge layout.
///
/// ```text
/// root/
///   train_labels.csv        (train split only)
///   train/ | test/
///     00000/
///       T1w/  T1wCE/  T2w/  FLAIR/
/// ```
///
/// Entries are visited in lexicographic name order, so `"10"` comes before
/// `"2"`. Entries whose name is not an integer are skipped. Any other problem
/// aborts the whole scan.
pub fn load_subjects(root_dir: &Path, train: bool) -> Result<Vec<Subject>> {
    let root = resolve_root(root_dir)?;
    scan_split(&root, train)
}

/// Expand a leading `~` or `~name` and canonicalize the path.
pub fn resolve_root(root_dir: &Path) -> Result<PathBuf> {
    let expanded = expand_home(root_dir)?;
    std::fs::canonicalize(&expanded).map_err(|source| DatasetError::ResolveRoot {
        path: expanded,
        source,
    })
}

/// Scan an already-resolved root.
pub(crate) fn scan_split(root: &Path, train: bool) -> Result<Vec<Subject>> {
    let (labels, subjects_dir) = if train {
        let labels = LabelTable::load(&root.join(LABELS_FILE))?;
        (Some(labels), root.join(TRAIN_DIR))
    } else {
        (None, root.join(TEST_DIR))
    };

    let mut subjects = Vec::new();
    for (name, subject_dir) in sorted_entries(&subjects_dir)? {
        let id = match name.to_str() {
            Some(id) if is_integer(id) => id.to_string(),
            _ => {
                log::debug!("Skipping non-subject entry {}", subject_dir.display());
                continue;
            }
        };

        let label = match &labels {
            Some(table) => Some(table.lookup(&id)?),
            None => None,
        };

        let images = [
            resolve_image(&subject_dir.join(MODALITIES[0].as_str()))?,
            resolve_image(&subject_dir.join(MODALITIES[1].as_str()))?,
            resolve_image(&subject_dir.join(MODALITIES[2].as_str()))?,
            resolve_image(&subject_dir.join(MODALITIES[3].as_str()))?,
        ];

        log::debug!("Indexed subject {id} (label {label:?})");
        subjects.push(Subject::new(id, label, images));
    }

    log::info!("Indexed {} subjects from {}", subjects.len(), subjects_dir.display());
    Ok(subjects)
}

/// Decide how one modality directory is referenced: a lone entry is used
/// directly, anything else (empty or a multi-file series) is handed over as
/// the directory itself.
pub fn resolve_image(modality_dir: &Path) -> Result<ImageRef> {
    let mut entries = std::fs::read_dir(modality_dir)
        .map_err(|e| DatasetError::io(modality_dir, e))?
        .map(|entry| {
            entry
                .map(|e| e.path())
                .map_err(|e| DatasetError::io(modality_dir, e))
        })
        .collect::<Result<Vec<PathBuf>>>()?;

    match entries.len() {
        1 => Ok(ImageRef::SingleFile(entries.remove(0))),
        0 => {
            log::warn!("Empty modality directory {}", modality_dir.display());
            Ok(ImageRef::Series(modality_dir.to_path_buf()))
        }
        _ => Ok(ImageRef::Series(modality_dir.to_path_buf())),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sorted_entries(dir: &Path) -> Result<Vec<(OsString, PathBuf)>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| DatasetError::io(dir, e))? {
        let entry = entry.map_err(|e| DatasetError::io(dir, e))?;
        entries.push((entry.file_name(), entry.path()));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

/// Expand `~` (current user) or `~name` (another user) at the start of `path`.
fn expand_home(path: &Path) -> Result<PathBuf> {
    let mut components = path.components();
    let first = match components.next() {
        Some(Component::Normal(first)) => first,
        _ => return Ok(path.to_path_buf()),
    };
    let Some(user) = first.to_str().and_then(|s| s.strip_prefix('~')) else {
        return Ok(path.to_path_buf());
    };

    let home = if user.is_empty() {
        dirs::home_dir().ok_or(DatasetError::HomeDirUnavailable)?
    } else {
        user_home(user)?
    };
    Ok(home.join(components.as_path()))
}

#[cfg(unix)]
fn user_home(name: &str) -> Result<PathBuf> {
    match nix::unistd::User::from_name(name) {
        Ok(Some(user)) => Ok(user.dir),
        Ok(None) => Err(DatasetError::UnknownUser {
            name: name.to_string(),
        }),
        Err(errno) => Err(DatasetError::io(format!("~{name}"), errno.into())),
    }
}

#[cfg(not(unix))]
fn user_home(name: &str) -> Result<PathBuf> {
    Err(DatasetError::UnknownUser {
        name: name.to_string(),
    })
}
