//! Profile compilation: Markdown frontmatter in, JSON feed out.
//!
//! # Architecture
//!
//! ```text
//! compile(content_dir)
//!     │
//!     ├── collect_profile_files() ──► *.md directly in content_dir, by file name
//!     │
//!     └── compile_file() per file
//!             │
//!             ├── read text
//!             ├── parse_frontmatter() ──► ordered key/value map
//!             └── StudentRecord::new(slug, frontmatter)
//!
//! write_feed(collection, feed_path)
//!     │
//!     └── temp file in the output dir ──► persisted over feed_path
//! ```
//!
//! Both steps are pure with respect to logging; `build::build_feed` reports progress.

mod error;
pub mod frontmatter;
mod record;

pub use error::CompileError;
pub use record::{StudentCollection, StudentRecord};

use crate::config::ParserKind;
use frontmatter::parse_frontmatter;
use std::{
    ffi::OsStr,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Extension of profile files. Compared case-sensitively.
pub const MARKDOWN_EXTENSION: &str = "md";

/// Compile every profile in `content_dir` into a collection.
///
/// Stops at the first file that cannot be read or parsed; nothing is written.
pub fn compile(content_dir: &Path, parser: ParserKind) -> Result<StudentCollection, CompileError> {
    collect_profile_files(content_dir)?
        .iter()
        .map(|path| compile_file(path, parser))
        .collect()
}

/// List profile files directly inside `dir`, sorted by file name.
///
/// Symlinks are followed, so a linked profile counts like a regular file.
/// Subdirectories are not descended into.
pub fn collect_profile_files(dir: &Path) -> Result<Vec<PathBuf>, CompileError> {
    let dir_error = |source: io::Error| CompileError::ContentDir {
        path: dir.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(dir).map_err(dir_error)?;
    if !metadata.is_dir() {
        return Err(dir_error(io::Error::new(
            io::ErrorKind::NotADirectory,
            "not a directory",
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            // A dangling link is reported against the link itself, and only
            // when it would have been a profile.
            Err(err) => match err.path().map(Path::to_path_buf) {
                Some(path) if path != dir && !is_profile(&path) => continue,
                Some(path) if path != dir => {
                    return Err(CompileError::Read {
                        path,
                        source: err.into(),
                    });
                }
                _ => return Err(dir_error(err.into())),
            },
        };
        if entry.file_type().is_file() && is_profile(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Compile a single profile file into a record.
pub fn compile_file(path: &Path, parser: ParserKind) -> Result<StudentRecord, CompileError> {
    let slug = slug_for(path)?;
    let text = fs::read_to_string(path).map_err(|source| CompileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let frontmatter =
        parse_frontmatter(&text, parser).map_err(|source| CompileError::Frontmatter {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(StudentRecord::new(slug, frontmatter))
}

/// Write the collection as a pretty-printed JSON array, replacing `feed_path`.
///
/// The parent directory is created when missing. Content goes to a temporary
/// file next to the target first, so a failed run leaves the old feed intact.
pub fn write_feed(collection: &StudentCollection, feed_path: &Path) -> Result<(), CompileError> {
    let json = collection
        .to_json_pretty()
        .map_err(CompileError::Serialize)?;

    let dir = feed_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let write_error = |source: io::Error| CompileError::Write {
        path: feed_path.to_path_buf(),
        source,
    };

    fs::create_dir_all(dir).map_err(write_error)?;
    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(json.as_bytes()).map_err(write_error)?;
    make_world_readable(file.as_file()).map_err(write_error)?;
    file.persist(feed_path)
        .map_err(|err| write_error(err.error))?;

    Ok(())
}

fn is_profile(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == MARKDOWN_EXTENSION)
}

/// Slug is the file name without its extension.
fn slug_for(path: &Path) -> Result<String, CompileError> {
    path.file_stem()
        .and_then(OsStr::to_str)
        .filter(|stem| !stem.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| CompileError::FileName(path.to_path_buf()))
}

/// Temp files start as 0600; the feed is meant to be served.
#[cfg(unix)]
fn make_world_readable(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn make_world_readable(_file: &fs::File) -> io::Result<()> {
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
