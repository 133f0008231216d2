use crate::{pdf, png, svg, Figure};
use std::path::Path;

pub fn generate(figure: &Figure, path: &Path) -> Result<(), String> {
    if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
        let file_type = FileType::from_extension(extension)
            .ok_or_else(|| format!("Unsupported file extension: {extension:?}"))?;
        let svg_content = svg::generate_string(figure);
        match file_type {
            FileType::Svg => svg::render_from_string(&svg_content, path),
            FileType::Png => png::render_from_string(&svg_content, path),
            FileType::Pdf => pdf::render_from_string(&svg_content, path),
        }
    } else {
        Err(format!("Failed to get extension from path: {path:?}"))
    }
}

#[derive(Debug, PartialEq)]
enum FileType {
    Svg,
    Png,
    Pdf,
}

impl FileType {
    fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "svg" => Some(FileType::Svg),
            "png" => Some(FileType::Png),
            "pdf" => Some(FileType::Pdf),
            _ => None,
        }
    }
}
