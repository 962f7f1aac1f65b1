use super::ProfileError;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Copies the contents of `source` into the existing directory `target`.
///
/// Symlinks are recreated as links rather than followed.
pub(crate) fn copy_tree(source: &Path, target: &Path) -> Result<usize, ProfileError> {
    let copy_err = |from: &Path, to: &Path, err: std::io::Error| ProfileError::Copy {
        from: from.display().to_string(),
        to: to.display().to_string(),
        source: err,
    };

    let mut copied = 0usize;
    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry.map_err(|err| copy_err(source, target, err.into()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|err| copy_err(entry.path(), target, std::io::Error::other(err)))?;
        let destination = target.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&destination)
                .map_err(|err| copy_err(entry.path(), &destination, err))?;
        } else if file_type.is_symlink() {
            let link = fs::read_link(entry.path())
                .map_err(|err| copy_err(entry.path(), &destination, err))?;
            let points_to_dir = fs::metadata(entry.path()).is_ok_and(|meta| meta.is_dir());
            create_symlink(&link, &destination, points_to_dir)
                .map_err(|err| copy_err(entry.path(), &destination, err))?;
            copied += 1;
        } else {
            fs::copy(entry.path(), &destination)
                .map_err(|err| copy_err(entry.path(), &destination, err))?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(unix)]
fn create_symlink(link: &Path, destination: &Path, _points_to_dir: bool) -> std::io::Result<()> {
    std::os::unix::fs::symlink(link, destination)
}

#[cfg(windows)]
fn create_symlink(link: &Path, destination: &Path, points_to_dir: bool) -> std::io::Result<()> {
    if points_to_dir {
        std::os::windows::fs::symlink_dir(link, destination)
    } else {
        std::os::windows::fs::symlink_file(link, destination)
    }
}
