//! Zip packaging of a generated project

use super::{ProjectFiles, SCRIPT_NAME};
use crate::error::ScaffoldError;
use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Zip the rendered `files` (plus `script`, when given) with entries under
/// `prefix/`. Entries are written in path order with a fixed timestamp so the
/// same inputs always give the same bytes. Nothing is read from disk, so
/// leftovers from earlier runs never end up in the archive.
pub fn package_files(
    files: &ProjectFiles,
    script: Option<&str>,
    prefix: &str,
) -> Result<Vec<u8>, ScaffoldError> {
    // None marks a directory entry
    let mut entries: BTreeMap<String, Option<&str>> = BTreeMap::new();
    let scripted = script.map(|s| (SCRIPT_NAME, s));
    for (path, contents) in files.iter().chain(scripted) {
        let mut dir = path;
        while let Some((parent, _)) = dir.rsplit_once('/') {
            entries.insert(format!("{parent}/"), None);
            dir = parent;
        }
        entries.insert(path.to_string(), Some(contents));
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let base = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    for (path, contents) in &entries {
        let name = format!("{prefix}/{path}");
        match contents {
            None => zip
                .add_directory(name.as_str(), base.unix_permissions(0o755))
                .map_err(|e| zip_error(&name, e))?,
            Some(contents) => {
                let mode = if path == SCRIPT_NAME { 0o755 } else { 0o644 };
                zip.start_file(name.as_str(), base.unix_permissions(mode))
                    .map_err(|e| zip_error(&name, e))?;
                zip.write_all(contents.as_bytes())
                    .map_err(|e| ScaffoldError::filesystem(&name, e))?;
            }
        }
    }

    let cursor = zip.finish().map_err(|e| zip_error(prefix, e))?;
    Ok(cursor.into_inner())
}

fn zip_error(name: &str, err: zip::result::ZipError) -> ScaffoldError {
    ScaffoldError::filesystem(name, std::io::Error::other(err))
}
