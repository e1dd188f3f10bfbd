use std::{
    cmp::Reverse,
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use stayhub_core::{
    draft_store::{decode_session, DraftKey, DraftStore},
    CoreError,
};
use stayhub_domain::PropertyCategory;
use tracing::{debug, warn};

const DRAFT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed JSON persistence: one file per draft key.
#[derive(Debug, Clone)]
pub struct JsonDraftStore {
    drafts_dir: PathBuf,
}

/// Listing row for a stored draft.
#[derive(Debug, Clone)]
pub struct DraftMetadata {
    pub key: DraftKey,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified_at: Option<DateTime<Utc>>,
    /// `None` when the file no longer parses.
    pub category: Option<PropertyCategory>,
    pub step: Option<usize>,
    pub name: Option<String>,
}

impl JsonDraftStore {
    pub fn new(drafts_dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&drafts_dir)?;
        Ok(Self { drafts_dir })
    }

    pub fn drafts_dir(&self) -> &Path {
        &self.drafts_dir
    }

    pub fn draft_path(&self, key: &DraftKey) -> PathBuf {
        self.drafts_dir
            .join(format!("{}.{}", canonical_name(key.as_str()), DRAFT_EXTENSION))
    }

    /// Every stored draft, most recently modified first.
    pub fn list_draft_metadata(&self) -> Result<Vec<DraftMetadata>, CoreError> {
        let mut rows = Vec::new();
        for key in self.keys()? {
            let path = self.draft_path(&key);
            let meta = fs::metadata(&path)?;
            let modified_at = meta.modified().ok().map(DateTime::<Utc>::from);
            let session = match self.read(&key)? {
                Some(raw) => match decode_session(&raw) {
                    Ok(session) => Some(session),
                    Err(err) => {
                        warn!(key = %key, error = %err, "draft file does not parse");
                        None
                    }
                },
                None => None,
            };
            rows.push(DraftMetadata {
                key,
                path,
                size_bytes: meta.len(),
                modified_at,
                category: session.as_ref().map(|s| s.category()),
                step: session.as_ref().map(|s| s.current_step),
                name: session.map(|s| s.property_draft.base.name),
            });
        }
        rows.sort_by_key(|row| Reverse(row.modified_at));
        Ok(rows)
    }
}

impl DraftStore for JsonDraftStore {
    fn read(&self, key: &DraftKey) -> Result<Option<String>, CoreError> {
        match fs::read_to_string(self.draft_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &DraftKey, contents: &str) -> Result<(), CoreError> {
        let path = self.draft_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, contents)?;
        fs::rename(&tmp, &path)?;
        debug!(key = %key, path = %path.display(), "draft written");
        Ok(())
    }

    fn remove(&self, key: &DraftKey) -> Result<(), CoreError> {
        let path = self.draft_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<DraftKey>, CoreError> {
        if !self.drafts_dir.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.drafts_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(DRAFT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                keys.push(DraftKey::from_raw(stem));
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Keeps keys usable as file stems; ids and prefixes pass through unchanged.
fn canonical_name(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "draft".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_name_keeps_ids() {
        assert_eq!(
            canonical_name("property_wizard_draft_64f1c0a9e2"),
            "property_wizard_draft_64f1c0a9e2"
        );
        assert_eq!(canonical_name("drafts/../x"), "drafts____x");
        assert_eq!(canonical_name("  "), "draft");
    }

    #[test]
    fn tmp_path_appends_suffix() {
        let tmp = tmp_path(Path::new("/drafts/a.json"));
        assert_eq!(tmp, PathBuf::from("/drafts/a.json.tmp"));
    }
}
