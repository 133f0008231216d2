use crate::prepare_svg_tree;
use resvg::{tiny_skia::Pixmap, usvg::Transform};
use std::path::Path;

/// Pixels per SVG unit; heatmap cells are only a few units wide.
const PNG_SCALE: f32 = 2.0;

pub fn render_from_string(svg_content: &str, path: &Path) -> Result<(), String> {
    let tree = prepare_svg_tree(svg_content.as_bytes())?;
    let size = tree
        .size()
        .to_int_size()
        .scale_by(PNG_SCALE)
        .ok_or_else(|| "Image is too large to rasterize".to_string())?;
    let mut pixmap = Pixmap::new(size.width(), size.height())
        .ok_or_else(|| format!("Unable to allocate a {}x{} image", size.width(), size.height()))?;
    resvg::render(
        &tree,
        Transform::from_scale(PNG_SCALE, PNG_SCALE),
        &mut pixmap.as_mut(),
    );
    pixmap
        .save_png(path)
        .map_err(|e| format!("{}: {}", path.display(), e))
}
