//! Output-file helpers built on `cap-std` and `camino`.
//!
//! Writes go through a directory handle opened with ambient authority, so a
//! caller only ever touches the directory it named.
#![forbid(unsafe_code)]

use std::io;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Write `contents` to `path`, creating missing parent directories and
/// replacing any existing file.
///
/// # Errors
///
/// Returns an error if `path` has no file name or any directory or file
/// operation fails.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
///
/// let dir = tempfile::tempdir()?;
/// let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
/// let target = root.join("out/boundaries.geojson");
/// mapstory_fs::write_file(&target, b"{}")?;
/// assert_eq!(std::fs::read_to_string(&target)?, "{}");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn write_file(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_parent_dir(path)?;
    dir.write(name, contents)
}

/// Create every missing directory above `path`.
///
/// # Errors
///
/// Returns an error if the anchor directory cannot be opened or a directory
/// cannot be created.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    let (anchor, relative) = split_anchor(parent);
    if relative.as_str().is_empty() {
        return Ok(());
    }
    fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?.create_dir_all(&relative)
}

/// Open the directory containing `path` and return it with the file name.
///
/// # Errors
///
/// Returns an error if `path` has no file name or its directory cannot be
/// opened.
pub fn open_parent_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, &str)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Split `path` into the part `cap-std` must open ambiently (root, drive
/// prefix, leading `.` and `..`) and the remainder below it.
fn split_anchor(path: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
    let mut anchor = Utf8PathBuf::new();
    let mut relative = Utf8PathBuf::new();
    for component in path.components() {
        let leading = relative.as_str().is_empty();
        match component {
            Utf8Component::Prefix(_)
            | Utf8Component::RootDir
            | Utf8Component::CurDir
            | Utf8Component::ParentDir
                if leading =>
            {
                anchor.push(component);
            }
            other => relative.push(other),
        }
    }
    if anchor.as_str().is_empty() {
        anchor.push(".");
    }
    (anchor, relative)
}
