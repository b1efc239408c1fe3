//! Executable lookup utilities.
//!
//! The discovery backends shell out to the platform's DNS-SD tools; this
//! module locates those tools on `PATH` so missing ones are caught at
//! startup instead of on first use.

use std::path::{Path, PathBuf};
use tracing::trace;

/// Find an executable by name on `PATH`.
///
/// Returns the first matching entry. Names containing a path separator are
/// checked as-is without consulting `PATH`.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    let found = std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|p| is_executable(p));

    if let Some(ref path) = found {
        trace!(name, path = %path.display(), "found executable");
    }
    found
}

/// Check whether a path points at an executable file.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_executable_missing() {
        assert!(find_executable("zeroscout-no-such-tool-xyzzy").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_find_executable_sh() {
        // /bin/sh is present on every unix we target
        assert!(find_executable("sh").is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_find_executable_absolute_path() {
        let found = find_executable("/bin/sh");
        assert_eq!(found, Some(PathBuf::from("/bin/sh")));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_file_is_skipped() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plainfile");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "not a program").unwrap();
        let mut perms = f.metadata().unwrap().permissions();
        use std::os::unix::fs::PermissionsExt;
        perms.set_mode(0o644);
        std::fs::set_permissions(&path, perms).unwrap();

        assert!(find_executable(path.to_str().unwrap()).is_none());
    }
}
