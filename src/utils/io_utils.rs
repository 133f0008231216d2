use std::path::{Path, PathBuf};

/// Derives `<stem>.<tag>.<ext>` next to `output_path`, used for the
/// per-chromosome images written alongside the main figure.
pub fn tagged_path(output_path: &Path, tag: &str) -> PathBuf {
    let stem = output_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let file_name = match output_path.extension() {
        Some(ext) => format!("{}.{}.{}", stem, tag, ext.to_string_lossy()),
        None => format!("{}.{}", stem, tag),
    };
    output_path.with_file_name(file_name)
}
