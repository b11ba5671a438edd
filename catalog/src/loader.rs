//! Loading many catalogs at once.
//!
//! [`CatalogSet`] indexes every catalog file in a directory by name, so a
//! host program can keep one file per tool and pick the catalog at run time.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::{CatalogFile, Format};
use crate::error::Result;

/// Catalogs keyed by name with O(1) lookup.
///
/// A catalog without a `name` is keyed by its file stem.
///
/// # Examples
///
/// ```no_run
/// use cmdline_options_catalog::CatalogSet;
///
/// let set = CatalogSet::from_dir("catalogs/").unwrap();
/// if let Some(file) = set.get("tool") {
///     let options = file.to_options().unwrap();
///     let cmd = file.parser().parse(&options, &["-v"]).unwrap();
///     println!("{cmd:?}");
/// }
/// ```
#[derive(Debug, Default)]
pub struct CatalogSet {
    catalogs: HashMap<String, CatalogFile>,
    root: Option<PathBuf>,
}

impl CatalogSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `.json`, `.yaml` and `.yml` file in `path`.
    ///
    /// Other files are skipped. When two files share a name the one read
    /// later wins.
    ///
    /// # Errors
    ///
    /// Returns the first I/O or parse error encountered.
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut set = Self {
            catalogs: HashMap::new(),
            root: Some(path.to_path_buf()),
        };

        for entry in std::fs::read_dir(path)? {
            let file_path = entry?.path();
            if Format::from_path(&file_path).is_none() {
                continue;
            }
            let mut file = CatalogFile::load(&file_path)?;
            if file.name.is_empty() {
                file.name = file_path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default();
            }
            set.insert(file);
        }

        debug!(path = %path.display(), catalogs = set.len(), "Catalog directory loaded");
        Ok(set)
    }

    /// Adds a catalog under its name, replacing any previous one.
    pub fn insert(&mut self, file: CatalogFile) {
        if let Some(previous) = self.catalogs.insert(file.name.clone(), file) {
            warn!(name = %previous.name, "Catalog replaced by a later file");
        }
    }

    /// Returns the catalog named `name`.
    pub fn get(&self, name: &str) -> Option<&CatalogFile> {
        self.catalogs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.catalogs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// Catalog names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.catalogs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Directory the set was loaded from, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }
}
