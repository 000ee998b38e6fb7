use anyhow::{Context, Result, anyhow};
use std::{
	fs,
	path::{Path, PathBuf},
};
use tilewriter_derive::context;

/// Writes `data` to `path` so that readers never observe a partial file.
///
/// The bytes go to a hidden sibling `.{name}.{uuid}.tmp` first, which is then renamed onto
/// `path`. Missing parent directories are created. On failure the temporary file is removed.
#[context("Failed to write {path:?}")]
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
	let parent = path.parent().ok_or_else(|| anyhow!("path has no parent directory"))?;
	if !parent.as_os_str().is_empty() {
		fs::create_dir_all(parent).with_context(|| format!("creating directory {parent:?}"))?;
	}

	let tmp = temp_path(path)?;
	let result = fs::write(&tmp, data)
		.with_context(|| format!("writing temporary file {tmp:?}"))
		.and_then(|()| fs::rename(&tmp, path).with_context(|| format!("renaming {tmp:?}")));

	if result.is_err() {
		let _ = fs::remove_file(&tmp);
	}
	result
}

fn temp_path(path: &Path) -> Result<PathBuf> {
	let name = path
		.file_name()
		.ok_or_else(|| anyhow!("path has no file name"))?
		.to_string_lossy();
	Ok(path.with_file_name(format!(".{name}.{}.tmp", uuid::Uuid::new_v4().simple())))
}

/// Returns `true` if `path` is a regular file.
pub fn is_file(path: &Path) -> bool {
	path.metadata().is_ok_and(|m| m.is_file())
}
