//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

/// Config file looked up in the project root when `--config` is not given.
pub const CONFIG_FILE: &str = "profile-feed.toml";

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "src/content/students".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn feed() -> PathBuf {
        "students.json".into()
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}

// ============================================================================
// [widget] Section Defaults
// ============================================================================

pub mod widget {
    pub fn url() -> String {
        "https://cdn.jsdelivr.net/gh/FUBAR-Pie/fce-students@main/public/students.json".into()
    }

    pub fn image_base() -> String {
        "https://cdn.jsdelivr.net/gh/FUBAR-Pie/fce-students@main/public/uploads/media/".into()
    }
}
