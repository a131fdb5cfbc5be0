// SPDX-License-Identifier: MPL-2.0

//! Frame asset discovery and ordering.
//!
//! A catalog is built once at startup and stays fixed for the life of the
//! process. Frames are ordered lexicographically by file name, so callers are
//! expected to name them with zero-padded sequence numbers
//! (`0001.png`, `0002.png`, ...).

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Image file extensions recognized as playable frames.
/// Checked case-insensitively.
const FRAME_EXTENSIONS: &[&str] = &["png"];

/// One still image representing one step of the animation.
///
/// A frame has no identity beyond its path; its file name doubles as the
/// sort key that encodes the frame number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameAsset {
    path: PathBuf,
}

impl FrameAsset {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used as the ordering key.
    fn sort_key(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Check if a path points to a recognized frame image.
pub(crate) fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            FRAME_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// The fixed, sorted list of frame assets that drives playback order.
#[derive(Debug, Default)]
pub struct Catalog {
    assets: Vec<FrameAsset>,
}

impl Catalog {
    /// Enumerate the frame images directly inside `dir`.
    ///
    /// Unrecognized files and subdirectories are ignored. A missing or
    /// unreadable directory yields an empty catalog; deciding whether that is
    /// fatal is left to the caller.
    pub fn scan(dir: &Path) -> Self {
        let mut assets: Vec<FrameAsset> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file() && is_frame_file(entry.path()))
            .map(|entry| FrameAsset {
                path: entry.into_path(),
            })
            .collect();

        assets.sort_by_key(FrameAsset::sort_key);

        Self { assets }
    }

    pub fn assets(&self) -> &[FrameAsset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").expect("create file");
    }

    #[test]
    fn recognizes_frame_extension() {
        assert!(is_frame_file(Path::new("frame.png")));
        assert!(is_frame_file(Path::new("frame.PNG")));
        assert!(is_frame_file(Path::new("/path/to/0001.png")));
        assert!(is_frame_file(Path::new(".hidden.png")));
        assert!(!is_frame_file(Path::new("frame.jpg")));
        assert!(!is_frame_file(Path::new("frame.mp4")));
        assert!(!is_frame_file(Path::new("frame")));
        assert!(!is_frame_file(Path::new("png")));
    }

    #[test]
    fn scan_sorts_lexicographically_by_file_name() {
        let dir = tempfile::tempdir().expect("temp dir");
        // Created deliberately out of order.
        touch(dir.path(), "0010.png");
        touch(dir.path(), "0002.png");
        touch(dir.path(), "0001.png");

        let catalog = Catalog::scan(dir.path());
        let names: Vec<String> = catalog
            .assets()
            .iter()
            .map(|asset| asset.sort_key())
            .collect();
        assert_eq!(names, ["0001.png", "0002.png", "0010.png"]);
    }

    #[test]
    fn scan_partitions_mixed_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        touch(dir.path(), "a.png");
        touch(dir.path(), "b.txt");
        touch(dir.path(), "c.png");
        touch(dir.path(), "notes.md");
        fs::create_dir(dir.path().join("nested.png")).expect("create dir");

        let catalog = Catalog::scan(dir.path());
        let names: Vec<String> = catalog
            .assets()
            .iter()
            .map(|asset| asset.sort_key())
            .collect();
        assert_eq!(names, ["a.png", "c.png"]);
    }

    #[test]
    fn scan_ignores_subdirectory_contents() {
        let dir = tempfile::tempdir().expect("temp dir");
        touch(dir.path(), "top.png");
        let nested = dir.path().join("more");
        fs::create_dir(&nested).expect("create dir");
        touch(&nested, "deep.png");

        let catalog = Catalog::scan(dir.path());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn scan_of_missing_directory_is_empty() {
        let catalog = Catalog::scan(Path::new("/nonexistent/frames"));
        assert!(catalog.is_empty());
    }
}
