use crate::error::IndexError;
use natord::compare_ignore_case;
use std::{
    collections::{HashMap, HashSet},
    fs::{metadata, read_dir},
    path::{Path, PathBuf},
};
use tracing::debug;

/// Accepted file suffixes, lowercase with a leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extensions(Vec<String>);

impl Extensions {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = Vec::new();

        for extension in extensions {
            let extension = extension
                .as_ref()
                .trim()
                .trim_start_matches('.')
                .to_lowercase();

            if extension.is_empty() {
                continue;
            }

            let extension = format!(".{extension}");

            if !normalized.contains(&extension) {
                normalized.push(extension);
            }
        }

        Self(normalized)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.0.iter().any(|extension| name.ends_with(extension.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for Extensions {
    fn default() -> Self {
        Self::new([".mp4", ".webm", ".mov"])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    name: String,
}

impl MediaItem {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Snapshot of the eligible files in a directory, in natural filename order.
///
/// Never refreshed: files added or removed after the scan are not seen.
#[derive(Debug, Clone)]
pub struct MediaIndex {
    dir: PathBuf,
    items: Vec<MediaItem>,
    positions: HashMap<String, usize>,
}

impl MediaIndex {
    pub fn new<I, S>(dir: impl Into<PathBuf>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut items = names
            .into_iter()
            .map(Into::<String>::into)
            .filter(|name| seen.insert(name.clone()))
            .map(|name| MediaItem { name })
            .collect::<Vec<MediaItem>>();

        items.sort_by(|a, b| compare_ignore_case(&a.name, &b.name));

        let positions = items
            .iter()
            .enumerate()
            .map(|(position, item)| (item.name.clone(), position))
            .collect();

        Self {
            dir: dir.into(),
            items,
            positions,
        }
    }

    /// Lists `dir` without descending into subdirectories. Only directory metadata is read.
    pub fn scan<P: AsRef<Path>>(dir: P, extensions: &Extensions) -> Result<Self, IndexError> {
        let dir = dir.as_ref().to_path_buf();
        let io_error = |error| IndexError::from_io(dir.clone(), error);

        if !metadata(&dir).map_err(io_error)?.is_dir() {
            return Err(IndexError::NotADirectory(dir.clone()));
        }

        let mut names = vec![];

        for entry in read_dir(&dir).map_err(io_error)? {
            let entry = entry.map_err(io_error)?;

            let Ok(name) = entry.file_name().into_string() else {
                debug!(path = %entry.path().display(), "Skipping non UTF-8 file name");
                continue;
            };

            if !extensions.matches(&name) {
                continue;
            }

            let file_type = entry.file_type().map_err(io_error)?;
            let is_file = if file_type.is_symlink() {
                metadata(entry.path()).is_ok_and(|metadata| metadata.is_file())
            } else {
                file_type.is_file()
            };

            if is_file {
                names.push(name);
            }
        }

        Ok(Self::new(dir, names))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&MediaItem> {
        self.positions
            .get(name)
            .map(|&position| &self.items[position])
    }

    pub fn path_of(&self, item: &MediaItem) -> PathBuf {
        self.dir.join(&item.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{File, create_dir};
    use tempfile::tempdir;

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            File::create(dir.join(name)).unwrap();
        }
    }

    fn names(index: &MediaIndex) -> Vec<&str> {
        index.items().iter().map(MediaItem::name).collect()
    }

    #[test]
    fn filters_by_extension() {
        let dir = tempdir().unwrap();
        touch(dir.path(), &["a.mp4", "b.webm", "c.png"]);

        let index = MediaIndex::scan(dir.path(), &Extensions::default()).unwrap();

        assert_eq!(names(&index), ["a.mp4", "b.webm"]);
    }

    #[test]
    fn extension_match_ignores_case() {
        let dir = tempdir().unwrap();
        touch(dir.path(), &["clip.MP4", "notes.txt", "Other.WebM"]);

        let index = MediaIndex::scan(dir.path(), &Extensions::default()).unwrap();

        assert_eq!(names(&index), ["clip.MP4", "Other.WebM"]);
    }

    #[test]
    fn skips_subdirectories() {
        let dir = tempdir().unwrap();
        touch(dir.path(), &["a.mp4"]);
        create_dir(dir.path().join("nested.mp4")).unwrap();
        touch(&dir.path().join("nested.mp4"), &["b.mp4"]);

        let index = MediaIndex::scan(dir.path(), &Extensions::default()).unwrap();

        assert_eq!(names(&index), ["a.mp4"]);
    }

    #[test]
    fn sorts_naturally() {
        let dir = tempdir().unwrap();
        touch(dir.path(), &["clip10.mp4", "clip2.mp4", "Clip1.mp4"]);

        let index = MediaIndex::scan(dir.path(), &Extensions::default()).unwrap();

        assert_eq!(names(&index), ["Clip1.mp4", "clip2.mp4", "clip10.mp4"]);
    }

    #[test]
    fn empty_directory_gives_empty_index() {
        let dir = tempdir().unwrap();

        let index = MediaIndex::scan(dir.path(), &Extensions::default()).unwrap();

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn missing_directory_is_not_found() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");

        let error = MediaIndex::scan(&missing, &Extensions::default()).unwrap_err();

        assert!(matches!(error, IndexError::NotFound(path) if path == missing));
    }

    #[test]
    fn file_path_is_not_a_directory() {
        let dir = tempdir().unwrap();
        touch(dir.path(), &["a.mp4"]);

        let error = MediaIndex::scan(dir.path().join("a.mp4"), &Extensions::default()).unwrap_err();

        assert!(matches!(error, IndexError::NotADirectory(_)));
    }

    #[test]
    fn new_deduplicates_names() {
        let index = MediaIndex::new("/videos", ["b.mp4", "a.mp4", "b.mp4"]);

        assert_eq!(names(&index), ["a.mp4", "b.mp4"]);
        assert_eq!(index.get("b.mp4").map(MediaItem::name), Some("b.mp4"));
        assert!(index.get("c.mp4").is_none());
        assert!(index.get("B.mp4").is_none());
        assert_eq!(
            index.path_of(&index.items()[0]),
            PathBuf::from("/videos/a.mp4")
        );
    }

    #[test]
    fn extensions_normalize() {
        let extensions = Extensions::new(["MP4", ".mov", " .mp4 ", ""]);

        assert_eq!(extensions.iter().collect::<Vec<_>>(), [".mp4", ".mov"]);
        assert!(extensions.matches("A.MOV"));
        assert!(!extensions.matches("mp4"));
    }
}
