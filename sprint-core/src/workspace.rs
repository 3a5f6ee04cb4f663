//! The config directory and active-sprint pointer, passed explicitly to
//! whatever needs them.

use std::fs;
use std::path::{Path, PathBuf};

use crate::assessment::AssessmentConfig;
use crate::buffer::EntryBuffer;
use crate::error::{Error, Result};

const ACTIVE_FILE: &str = "active";

/// Root of all persisted sprint state.
///
/// Two workspaces on different directories never see each other's files,
/// so tests and parallel sprints do not interfere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    config_dir: PathBuf,
}

impl Workspace {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    // ============================================================
    // Active pointer
    // ============================================================

    pub fn set_active(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        fs::create_dir_all(&self.config_dir).map_err(|e| Error::io(&self.config_dir, e))?;
        let path = self.active_path();
        fs::write(&path, name).map_err(|e| Error::io(&path, e))?;
        tracing::info!("Active sprint set to '{}'", name);
        Ok(())
    }

    /// The active sprint name, or `None` when no sprint was ever activated.
    pub fn get_active(&self) -> Result<Option<String>> {
        let path = self.active_path();
        if !path.exists() {
            return Ok(None);
        }
        let name = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let name = name.trim();
        Ok((!name.is_empty()).then(|| name.to_string()))
    }

    pub fn require_active(&self) -> Result<String> {
        self.get_active()?.ok_or_else(|| {
            Error::NotFound("No active sprint. Run `sprint init` first.".to_string())
        })
    }

    fn active_path(&self) -> PathBuf {
        self.config_dir.join(ACTIVE_FILE)
    }

    // ============================================================
    // Sprint files
    // ============================================================

    pub fn create_assessment(&self, name: &str) -> Result<AssessmentConfig> {
        validate_name(name)?;
        Ok(AssessmentConfig::create(name, &self.config_dir))
    }

    pub fn load_assessment(&self, name: &str) -> Result<AssessmentConfig> {
        validate_name(name)?;
        AssessmentConfig::load(name, &self.config_dir)
    }

    pub fn buffer_path(&self, name: &str) -> PathBuf {
        self.config_dir.join(format!("{}.buffer.json", name))
    }

    pub fn load_buffer(&self, name: &str) -> Result<EntryBuffer> {
        validate_name(name)?;
        EntryBuffer::load(self.buffer_path(name))
    }
}

/// Sprint names become file names, so they must be a single plain path component.
fn validate_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if invalid {
        Err(Error::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_like_names() {
        for name in ["", "  ", "../etc", "a/b", ".hidden", "a\\b"] {
            assert!(
                matches!(validate_name(name), Err(Error::InvalidName(_))),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn accepts_plain_names() {
        assert!(validate_name("sprint-11").is_ok());
        assert!(validate_name("Q3 web app").is_ok());
    }
}
