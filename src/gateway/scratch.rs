use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

/// SVG text parked in a temporary `.svg` file for the converter to read.
///
/// The file lives exactly as long as the guard. Dropping it deletes the
/// file; [`ScratchSvg::close`] does the same but reports deletion errors.
pub struct ScratchSvg {
    file: NamedTempFile,
}

impl ScratchSvg {
    /// Create the file in `dir` (or the system temp dir) and write `content`
    /// verbatim.
    pub fn create(content: &str, dir: Option<&Path>) -> std::io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("svg-gcode-").suffix(".svg");

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        file.write_all(content.as_bytes())?;
        file.as_file_mut().sync_all()?;

        tracing::debug!(
            path = %file.path().display(),
            bytes = content.len(),
            "wrote scratch svg"
        );

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the file. A file that is already gone counts as removed.
    pub fn close(self) -> std::io::Result<()> {
        let path = self.file.path().to_path_buf();
        match self.file.close() {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed scratch svg");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "scratch svg already removed");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
