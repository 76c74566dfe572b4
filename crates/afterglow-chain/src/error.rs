use std::fmt;

/// A validation failure while loading a suppression rule from its
/// configuration record.
///
/// The message already carries the caller-supplied context prefix (which
/// chain/pass was being loaded), so it can be surfaced verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadError {
    pub message: String,
}

impl ReadError {
    pub(crate) fn new(prefix: &str, msg: impl AsRef<str>) -> Self {
        Self { message: format!("{prefix}{}", msg.as_ref()) }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ReadError {}

/// Render-target resource acquisition failure.
///
/// A target is unusable without both its textures and framebuffers, so a
/// provider handing back an invalid handle fails the whole construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetError {
    pub message: String,
}

impl TargetError {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self { message: msg.into() }
    }
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TargetError {}
