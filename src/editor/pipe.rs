use std::ffi::CString;
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

use crate::error::SessionError;

const PIPE_NAME: &str = "pipe";

/// Named pipe the editor writes gdb commands into.
///
/// Lives in a fresh `vimgdb.XXXXXX` directory (mode 0700) so the path is
/// unique per run. The FIFO itself is created with mode 0600. The pipe and
/// its directory are removed by [`EditorPipe::remove`] or on drop.
#[derive(Debug)]
pub struct EditorPipe {
    dir: Option<tempfile::TempDir>,
    path: PathBuf,
}

impl EditorPipe {
    pub fn create(parent: &Path) -> Result<Self, SessionError> {
        let dir = tempfile::Builder::new()
            .prefix("vimgdb.")
            .tempdir_in(parent)
            .map_err(|source| SessionError::Pipe {
                path: parent.to_path_buf(),
                source,
            })?;
        let path = dir.path().join(PIPE_NAME);

        mkfifo(&path, 0o600).map_err(|source| SessionError::Pipe {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), "editor pipe created");
        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the read end without waiting for a writer.
    pub fn open_reader(&self) -> io::Result<File> {
        open_fifo_reader(&self.path)
    }

    /// Delete the pipe and its directory. Safe to call more than once.
    pub fn remove(&mut self) -> io::Result<()> {
        let Some(dir) = self.dir.take() else {
            return Ok(());
        };
        tracing::info!(path = %self.path.display(), "removing editor pipe");
        dir.close()
    }
}

impl Drop for EditorPipe {
    fn drop(&mut self) {
        let _ = self.remove();
    }
}

/// Open a FIFO for reading without waiting for a writer.
///
/// The descriptor is opened read-write and non-blocking. Holding a write
/// end ourselves means the editor closing its end never reads as end of
/// stream and nothing it wrote is dropped between reconnects; readiness is
/// observed with `poll`.
pub fn open_fifo_reader(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .custom_flags(libc::O_NONBLOCK | libc::O_CLOEXEC)
        .open(path)
}

fn mkfifo(path: &Path, mode: libc::mode_t) -> io::Result<()> {
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let rc = unsafe { libc::mkfifo(c_path.as_ptr(), mode) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    // mkfifo honours the umask; force owner-only explicitly.
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::FileTypeExt;

    #[test]
    fn creates_owner_only_fifo() {
        let parent = tempfile::tempdir().unwrap();
        let pipe = EditorPipe::create(parent.path()).unwrap();

        let meta = std::fs::metadata(pipe.path()).unwrap();
        assert!(meta.file_type().is_fifo());
        assert_eq!(meta.permissions().mode() & 0o777, 0o600);
        assert!(pipe.path().starts_with(parent.path()));
    }

    #[test]
    fn paths_are_unique_per_pipe() {
        let parent = tempfile::tempdir().unwrap();
        let a = EditorPipe::create(parent.path()).unwrap();
        let b = EditorPipe::create(parent.path()).unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn remove_deletes_pipe_and_is_idempotent() {
        let parent = tempfile::tempdir().unwrap();
        let mut pipe = EditorPipe::create(parent.path()).unwrap();
        let path = pipe.path().to_path_buf();

        pipe.remove().unwrap();
        assert!(!path.exists());
        assert!(!path.parent().unwrap().exists());
        pipe.remove().unwrap();
    }

    #[test]
    fn drop_removes_pipe() {
        let parent = tempfile::tempdir().unwrap();
        let path = {
            let pipe = EditorPipe::create(parent.path()).unwrap();
            pipe.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn missing_parent_is_pipe_error() {
        let err = EditorPipe::create(Path::new("/nonexistent/vimgdb-parent")).unwrap_err();
        assert!(matches!(err, SessionError::Pipe { .. }));
    }

    #[test]
    fn reader_opens_without_writer() {
        let parent = tempfile::tempdir().unwrap();
        let pipe = EditorPipe::create(parent.path()).unwrap();
        assert!(pipe.open_reader().is_ok());
    }
}
