//! Full-vault scan: walk, extract in parallel, cache, then filter.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use thiserror::Error;

use super::extractor::extract_note;
use super::types::NoteRecord;
use super::walker::{VaultWalker, VaultWalkerError, WalkedFile};
use crate::cache::{DEFAULT_MAX_AGE, VaultCache};

/// Default cap on the number of files considered by one scan.
pub const DEFAULT_MAX_FILES: usize = 5000;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("vault root does not exist: {0}")]
    MissingRoot(String),
}

impl From<VaultWalkerError> for ScanError {
    fn from(err: VaultWalkerError) -> Self {
        match err {
            VaultWalkerError::MissingRoot(path) => Self::MissingRoot(path),
        }
    }
}

/// Result of the per-note callback passed to [`VaultScanner::scan_with`].
#[derive(Debug, Clone, PartialEq)]
pub enum Decision<T> {
    /// Include this (possibly annotated) value in the output.
    Keep(T),
    /// Leave the note out.
    Drop,
}

impl<T> Decision<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Keep(value) => Some(value),
            Self::Drop => None,
        }
    }
}

/// Scans a vault into [`NoteRecord`]s.
///
/// ```no_run
/// use vaultdash_core::vault::{Decision, VaultScanner};
/// use std::path::Path;
///
/// let todos = VaultScanner::new(Path::new("/home/me/Vault"))
///     .scan_with(|note| {
///         if note.has_tag("todo") { Decision::Keep(note) } else { Decision::Drop }
///     })
///     .unwrap();
/// ```
pub struct VaultScanner<'a> {
    root: PathBuf,
    cache: Option<&'a VaultCache>,
    max_age: Duration,
    use_cache: bool,
    max_files: usize,
    exclude: Vec<PathBuf>,
}

impl<'a> VaultScanner<'a> {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            cache: None,
            max_age: DEFAULT_MAX_AGE,
            use_cache: true,
            max_files: DEFAULT_MAX_FILES,
            exclude: Vec::new(),
        }
    }

    /// Use `cache` for reads (when fresh) and for storing every fresh scan.
    pub fn cache(mut self, cache: &'a VaultCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// When false, a fresh cache entry is ignored and the tree is walked.
    /// The result is still written back to the cache.
    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Folders to skip, relative to the vault root or absolute.
    pub fn exclude(mut self, folders: Vec<PathBuf>) -> Self {
        self.exclude = folders;
        self
    }

    /// Every eligible note, unfiltered. Order is unspecified.
    pub fn scan(&self) -> Result<Vec<NoteRecord>, ScanError> {
        self.scan_with(Decision::Keep)
    }

    /// Scan and pass each note through `decide`.
    ///
    /// The cache always receives the unfiltered notes; `decide` runs after
    /// the cache write.
    pub fn scan_with<T, F>(&self, decide: F) -> Result<Vec<T>, ScanError>
    where
        F: Fn(NoteRecord) -> Decision<T>,
    {
        let root = self
            .root
            .canonicalize()
            .map_err(|_| ScanError::MissingRoot(self.root.display().to_string()))?;

        let notes = match self.cached_notes(&root) {
            Some(notes) => notes,
            None => {
                let notes = self.walk_and_extract(&root)?;
                if let Some(cache) = self.cache
                    && let Err(e) = cache.put(&root, &notes)
                {
                    tracing::warn!("Failed to write scan cache for {}: {}", root.display(), e);
                }
                notes
            }
        };

        Ok(notes.into_iter().filter_map(|note| decide(note).into_option()).collect())
    }

    fn cached_notes(&self, root: &Path) -> Option<Vec<NoteRecord>> {
        let cache = self.cache.filter(|_| self.use_cache)?;
        if !cache.is_fresh(root, self.max_age) {
            return None;
        }
        let notes = cache.get(root)?;
        tracing::info!("Using cached scan of {} ({} notes)", root.display(), notes.len());
        Some(notes)
    }

    fn walk_and_extract(&self, root: &Path) -> Result<Vec<NoteRecord>, ScanError> {
        let start = Instant::now();
        let walker = VaultWalker::with_exclusions(root, self.exclude.clone())?;
        let mut files = walker.walk();

        if files.len() > self.max_files {
            tracing::warn!(
                "Vault has {} markdown files; only the first {} are scanned",
                files.len(),
                self.max_files
            );
            files.truncate(self.max_files);
        }

        let notes: Vec<NoteRecord> = files.par_iter().filter_map(read_note).collect();

        tracing::info!(
            "Scanned {} notes ({} files) in {}ms",
            notes.len(),
            files.len(),
            start.elapsed().as_millis()
        );
        Ok(notes)
    }
}

fn read_note(file: &WalkedFile) -> Option<NoteRecord> {
    match fs::read_to_string(&file.absolute_path) {
        Ok(content) => Some(extract_note(&content, file)),
        Err(e) => {
            tracing::debug!("Dropping {}: {}", file.relative_path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vault() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "---\ntags: [proj/todo]\n---\n# A\n").unwrap();
        fs::write(dir.path().join("b.md"), "# B\n#other\n").unwrap();
        fs::create_dir(dir.path().join("Templates")).unwrap();
        fs::write(dir.path().join("Templates/t.md"), "# T\n").unwrap();
        dir
    }

    fn titles(notes: &[NoteRecord]) -> Vec<String> {
        let mut titles: Vec<String> = notes.iter().map(|n| n.title.clone()).collect();
        titles.sort();
        titles
    }

    #[test]
    fn test_scan_without_cache() {
        let vault = vault();
        let notes = VaultScanner::new(vault.path()).scan().unwrap();
        assert_eq!(titles(&notes), vec!["A", "B", "T"]);
        let b = notes.iter().find(|n| n.title == "B").unwrap();
        assert!(b.has_tag("other"));
    }

    #[test]
    fn test_scan_with_callback() {
        let vault = vault();
        let kept = VaultScanner::new(vault.path())
            .scan_with(|n| if n.has_tag("proj/todo") { Decision::Keep(n.title) } else { Decision::Drop })
            .unwrap();
        assert_eq!(kept, vec!["A".to_string()]);
    }

    #[test]
    fn test_exclusions_and_cap() {
        let vault = vault();
        let notes = VaultScanner::new(vault.path())
            .exclude(vec![PathBuf::from("Templates")])
            .scan()
            .unwrap();
        assert_eq!(titles(&notes), vec!["A", "B"]);

        let capped = VaultScanner::new(vault.path()).max_files(1).scan().unwrap();
        assert_eq!(capped.len(), 1);
    }

    #[test]
    fn test_missing_root() {
        let err = VaultScanner::new(Path::new("/nonexistent/vault")).scan().unwrap_err();
        assert!(matches!(err, ScanError::MissingRoot(_)));
    }

    #[test]
    fn test_unreadable_file_is_dropped() {
        let vault = vault();
        fs::write(vault.path().join("binary.md"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        let notes = VaultScanner::new(vault.path()).scan().unwrap();
        assert_eq!(notes.len(), 3);
    }

    #[test]
    fn test_cache_stores_unfiltered_notes() {
        let vault = vault();
        let cache = VaultCache::open_in_memory().unwrap();
        let kept = VaultScanner::new(vault.path())
            .cache(&cache)
            .scan_with(|_| Decision::<NoteRecord>::Drop)
            .unwrap();
        assert!(kept.is_empty());

        let root = vault.path().canonicalize().unwrap();
        assert_eq!(cache.get(&root).map(|n| n.len()), Some(3));
    }

    #[test]
    fn test_use_cache_false_rewalks() {
        let vault = vault();
        let cache = VaultCache::open_in_memory().unwrap();
        let scanner = VaultScanner::new(vault.path()).cache(&cache);
        scanner.scan().unwrap();

        fs::write(vault.path().join("c.md"), "# C\n").unwrap();
        assert_eq!(scanner.scan().unwrap().len(), 3);

        let rebuilt = VaultScanner::new(vault.path()).cache(&cache).use_cache(false).scan().unwrap();
        assert_eq!(rebuilt.len(), 4);
        // the forced scan refreshed the cache too
        assert_eq!(scanner.scan().unwrap().len(), 4);
    }

    #[test]
    fn test_zero_max_age_is_never_fresh() {
        let vault = vault();
        let cache = VaultCache::open_in_memory().unwrap();
        let scanner = VaultScanner::new(vault.path()).cache(&cache).max_age(Duration::ZERO);
        scanner.scan().unwrap();
        fs::remove_file(vault.path().join("b.md")).unwrap();
        assert_eq!(scanner.scan().unwrap().len(), 2);
    }
}
