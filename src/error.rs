// Copyright 2026 The dvdid Project Developers. Licensed under MIT or Apache-2.0.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a disc identification.
///
/// The set is closed: every lower-level I/O failure is mapped to the variant
/// whose invariant it broke. All of these abort the computation; none leave
/// a partial result behind.
#[derive(Debug, Error)]
pub enum DvdidError {
    /// The supplied disc root, or the `VIDEO_TS` directory beneath it, does
    /// not exist or is not a directory.
    #[error("path '{}' does not exist", .0.display())]
    PathNotFound(PathBuf),

    /// A file's creation time (seconds since the Unix epoch) falls outside
    /// the window representable as a Windows FILETIME.
    #[error("file time {0} is outside the range 1601-01-01 to 9999-12-31")]
    TimestampOutOfRange(i64),

    /// Fewer content bytes were obtained for a descriptor file than its
    /// size requires.
    #[error("expected to read {expected} content bytes, got {}", fmt_actual(.actual))]
    ContentReadIncomplete {
        expected: u64,
        actual: Option<u64>,
    },

    /// One of the two descriptor files that contribute content to the
    /// identifier is absent.
    #[error("required file '{0}' is missing from the VIDEO_TS directory")]
    RequiredFileMissing(String),
}

fn fmt_actual(actual: &Option<u64>) -> String {
    match actual {
        Some(count) => count.to_string(),
        None => "none".to_string(),
    }
}
