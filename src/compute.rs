// Copyright 2026 The dvdid Project Developers. Licensed under MIT or Apache-2.0.

//! Canonical serialization of a title set into the identifier checksum,
//! plus the filesystem front-end that feeds it.

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;

use crate::{Crc64Result, Digest, DvdidError};

/// Name of the directory holding the title descriptor and stream files.
const VIDEO_TS: &str = "VIDEO_TS";

/// The volume descriptor and the first title's descriptor, the two files
/// whose leading content contributes to the identifier.
const DESCRIPTOR_FILES: [&str; 2] = ["VIDEO_TS.IFO", "VTS_01_0.IFO"];

/// How much of each descriptor file is fed into the checksum.
const DESCRIPTOR_PREFIX: u64 = 0x10000;

/// Seconds between the FILETIME epoch (1601-01-01T00:00:00Z) and the Unix
/// epoch.
const FILETIME_EPOCH_DELTA: i64 = 11_644_473_600;

/// First Unix second past the FILETIME window (10000-01-01T00:00:00Z).
const FILETIME_MAX: i64 = 253_402_300_800;

/// One file of a title set, as consumed by [`fingerprint`].
///
/// [`compute`] builds these from a mounted filesystem; a caller backed by a
/// different storage (a raw ISO reader, say) can construct them directly
/// and feed the same core.
#[derive(Clone, Debug)]
pub struct TitleFile {
    /// Base name, no directory component.
    pub name: String,
    /// Size in bytes as reported by the storage.
    pub size: u64,
    /// Creation time in whole seconds since the Unix epoch.
    pub created: i64,
    /// Leading content bytes; required for the two descriptor files,
    /// ignored for everything else.
    pub content: Option<Vec<u8>>,
}

/// Computes the disc identifier for a DVD-Video folder.
///
/// `path` is the disc root, the directory containing `VIDEO_TS`.
pub fn compute(path: impl AsRef<Path>) -> Result<Crc64Result, DvdidError> {
    let path = path.as_ref();
    if !path.is_dir() {
        return Err(DvdidError::PathNotFound(path.to_path_buf()));
    }

    let video_ts = path.join(VIDEO_TS);
    if !video_ts.is_dir() {
        return Err(DvdidError::PathNotFound(video_ts));
    }

    let files = list_title_files(&video_ts)?;
    debug!("hashing {} files under {}", files.len(), video_ts.display());

    fingerprint(&files)
}

/// Folds an already-listed title set into the identifier.
///
/// Files are sorted by the byte order of their names. The metadata of every
/// file is fed first (creation time, size, NUL-terminated name), then the
/// leading content of the two descriptor files, both passes in sort order.
/// The two passes must stay separate: interleaving metadata and content
/// changes the checksum.
pub fn fingerprint(files: &[TitleFile]) -> Result<Crc64Result, DvdidError> {
    let mut sorted: Vec<&TitleFile> = files.iter().collect();
    sorted.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));

    let mut digest = Digest::new();
    for file in &sorted {
        digest.write(&creation_time_bytes(file.created)?);
        digest.write(&size_bytes(file.size));
        digest.write(&name_bytes(&file.name));
    }

    for required in DESCRIPTOR_FILES {
        if !sorted.iter().any(|file| file.name == required) {
            return Err(DvdidError::RequiredFileMissing(required.to_string()));
        }
    }

    for file in &sorted {
        if !DESCRIPTOR_FILES.contains(&file.name.as_str()) {
            continue;
        }
        let expected = file.size.min(DESCRIPTOR_PREFIX);
        let content = file
            .content
            .as_deref()
            .ok_or(DvdidError::ContentReadIncomplete {
                expected,
                actual: None,
            })?;
        if (content.len() as u64) < expected {
            return Err(DvdidError::ContentReadIncomplete {
                expected,
                actual: Some(content.len() as u64),
            });
        }
        digest.write(&content[..expected as usize]);
    }

    Ok(digest.result())
}

/// Creation time as a Windows FILETIME (100 ns ticks since 1601-01-01),
/// 8 bytes unsigned little-endian.
fn creation_time_bytes(unix_secs: i64) -> Result<[u8; 8], DvdidError> {
    if !(-FILETIME_EPOCH_DELTA..FILETIME_MAX).contains(&unix_secs) {
        return Err(DvdidError::TimestampOutOfRange(unix_secs));
    }
    let ticks = (unix_secs + FILETIME_EPOCH_DELTA) as u64 * 10_000_000;
    Ok(ticks.to_le_bytes())
}

/// File size as an unsigned 32-bit little-endian integer. Sizes past
/// 2^32 - 1 wrap, matching the 32-bit size field of ISO9660 directory
/// records.
fn size_bytes(size: u64) -> [u8; 4] {
    (size as u32).to_le_bytes()
}

/// Base name as UTF-8 with a trailing NUL.
fn name_bytes(name: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(name.len() + 1);
    bytes.extend_from_slice(name.as_bytes());
    bytes.push(0);
    bytes
}

/// Lists the regular files directly inside `VIDEO_TS`, reading the leading
/// content of the two descriptor files along the way. No recursion.
fn list_title_files(video_ts: &Path) -> Result<Vec<TitleFile>, DvdidError> {
    let entries = fs::read_dir(video_ts)
        .map_err(|_| DvdidError::PathNotFound(video_ts.to_path_buf()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|_| DvdidError::PathNotFound(video_ts.to_path_buf()))?;
        let path = entry.path();
        let meta = fs::metadata(&path).map_err(|_| DvdidError::PathNotFound(path.clone()))?;
        if !meta.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let created =
            creation_seconds(&meta).map_err(|_| DvdidError::PathNotFound(path.clone()))?;
        let content = if DESCRIPTOR_FILES.contains(&name.as_str()) {
            Some(read_descriptor_prefix(
                &path,
                meta.len().min(DESCRIPTOR_PREFIX),
            )?)
        } else {
            None
        };

        files.push(TitleFile {
            name,
            size: meta.len(),
            created,
            content,
        });
    }
    Ok(files)
}

/// Reads up to `expected` leading bytes of a descriptor file. The length
/// check against `expected` happens in [`fingerprint`].
fn read_descriptor_prefix(path: &Path, expected: u64) -> Result<Vec<u8>, DvdidError> {
    let file = fs::File::open(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            DvdidError::RequiredFileMissing(name)
        } else {
            DvdidError::ContentReadIncomplete {
                expected,
                actual: None,
            }
        }
    })?;

    let mut content = Vec::with_capacity(expected as usize);
    file.take(expected)
        .read_to_end(&mut content)
        .map_err(|_| DvdidError::ContentReadIncomplete {
            expected,
            actual: None,
        })?;
    debug!("read {} leading bytes of {}", content.len(), path.display());
    Ok(content)
}

/// Birth time where the filesystem records it, modification time otherwise.
fn creation_seconds(meta: &fs::Metadata) -> io::Result<i64> {
    let time = meta.created().or_else(|_| meta.modified())?;
    Ok(unix_seconds(time))
}

/// Whole seconds since the Unix epoch, fractional part truncated toward
/// zero on both sides of the epoch.
fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(since) => since.as_secs() as i64,
        Err(before) => -(before.duration().as_secs() as i64),
    }
}
