//! Compile error types.

use super::frontmatter::FrontmatterError;
use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Everything that stops a compile run. None of them are retried.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("cannot read content directory `{}`", path.display())]
    ContentDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse frontmatter in `{}`", path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },

    #[error("cannot derive a slug from `{}`", .0.display())]
    FileName(PathBuf),

    #[error("failed to serialize the feed")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write feed `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CompileError {
    /// The file or directory the error is about, if any.
    #[cfg(test)]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::ContentDir { path, .. }
            | Self::Read { path, .. }
            | Self::Frontmatter { path, .. }
            | Self::Write { path, .. }
            | Self::FileName(path) => Some(path),
            Self::Serialize(_) => None,
        }
    }
}
