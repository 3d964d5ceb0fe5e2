use crate::paths;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Immutable facts about a session: where the archive was extracted and
/// whether commands are held inside it.
///
/// The current directory is deliberately not part of the environment. It is
/// a cursor value passed into every dispatch and handed back by it, see
/// [`crate::Interpreter::dispatch`].
#[derive(Debug, Clone)]
pub struct Environment {
    root: PathBuf,
    canonical_root: PathBuf,
    confine: bool,
}

impl Environment {
    /// Create an environment rooted at an extracted archive directory.
    ///
    /// Fails when `root` does not exist or cannot be canonicalized.
    pub fn new(root: impl Into<PathBuf>, confine: bool) -> Result<Self> {
        let root = root.into();
        let canonical_root = dunce::canonicalize(&root)
            .with_context(|| format!("can't canonicalize root {}", root.display()))?;
        Ok(Self {
            root,
            canonical_root,
            confine,
        })
    }

    /// The root directory as it was handed to the session.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn confined(&self) -> bool {
        self.confine
    }

    /// Logical `root:/...` form of a cursor.
    pub fn logical(&self, cwd: &Path) -> String {
        paths::to_logical(&self.root, cwd)
    }

    /// Whether the session may step onto `candidate`. Always true when
    /// confinement is off.
    pub fn admits(&self, candidate: &Path) -> bool {
        !self.confine || paths::is_within(&self.canonical_root, candidate)
    }
}
