use std::fs::{DirBuilder, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ConversionError, Result};

pub const TYPES_FILE_NAME: &str = "types.ts";

#[cfg(unix)]
const FILE_MODE: u32 = 0o644;
#[cfg(unix)]
const DIR_MODE: u32 = 0o755;

/// Write `content` to `<out_dir>/types.ts`. A missing `out_dir` is created
/// and the write retried once; any other failure is returned.
pub fn write_types(out_dir: &Path, content: &str) -> Result<PathBuf> {
    let path = out_dir.join(TYPES_FILE_NAME);

    let written = match write_file(&path, content) {
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(dir = %out_dir.display(), "creating output directory");
            create_dir(out_dir).map_err(|source| ConversionError::CreateDir {
                path: out_dir.to_path_buf(),
                source,
            })?;
            write_file(&path, content)
        }
        other => other,
    };
    written.map_err(|source| ConversionError::Write {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), "wrote type declarations");
    Ok(path)
}

fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    options.open(path)?.write_all(content.as_bytes())
}

fn create_dir(dir: &Path) -> std::io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }

    builder.create(dir)
}
