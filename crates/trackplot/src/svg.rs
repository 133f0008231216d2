use crate::plot::{Color, Figure, Heatmap, LinePlot, Marker, Series, Tick};
use std::path::Path;

const DEFAULT_WIDTH: f64 = 1000.0;
const DEFAULT_TRACK_HEIGHT: f64 = 320.0;
const DEFAULT_ROW_HEIGHT: f64 = 4.0;
const DEFAULT_PADDING: f64 = 12.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 48.0;
const LEGEND_HEIGHT: f64 = 28.0;

pub fn generate_string(figure: &Figure) -> String {
    let mut generator = Generator::new(DEFAULT_WIDTH, DEFAULT_PADDING);
    match figure {
        Figure::Line(plot) => generator.generate_line_plot(plot),
        Figure::Heat(heatmap) => generator.generate_heatmap(heatmap),
    }
    generator.svg
}

pub fn render_from_string(svg_content: &str, path: &Path) -> Result<(), String> {
    std::fs::write(path, svg_content).map_err(|e| e.to_string())
}

struct Generator {
    width: f64,
    pad: f64,
    svg: String,
}

impl Generator {
    fn new(width: f64, pad: f64) -> Self {
        Self {
            width,
            pad,
            svg: String::new(),
        }
    }

    fn generate_line_plot(&mut self, plot: &LinePlot) {
        let height = MARGIN_TOP + DEFAULT_TRACK_HEIGHT + MARGIN_BOTTOM + 2.0 * self.pad;
        self.start_svg(self.width, height);
        self.add_background();
        self.add_title(&plot.title);

        let area = Area {
            x: MARGIN_LEFT + self.pad,
            y: MARGIN_TOP + self.pad,
            width: self.width - MARGIN_LEFT - 2.0 * self.pad,
            height: DEFAULT_TRACK_HEIGHT,
            x_range: plot.x_range,
            y_range: plot.y_range,
        };
        self.add_frame(&area);

        if let Some(message) = &plot.message {
            let (x, y) = (area.x + area.width / 2.0, area.y + area.height / 2.0);
            self.add_text((x, y), message, 16, "middle");
            self.end_svg();
            return;
        }

        for tick in &plot.y_ticks {
            let y = area.to_y(tick.pos);
            self.add_line((area.x - 4.0, y), (area.x, y), "#000000", 1.0, false);
            self.add_text((area.x - 6.0, y + 4.0), &tick.label, 11, "end");
        }

        for tick in &plot.x_ticks {
            let x = area.to_x(tick.pos);
            let y = area.y + area.height;
            self.add_text((x, y + 16.0), &tick.label, 11, "middle");
        }

        for vline in &plot.vlines {
            let x = area.to_x(vline.pos);
            let (top, bottom) = (area.y, area.y + area.height);
            self.add_line((x, top), (x, bottom), &vline.color, 1.0, vline.dashed);
        }

        for series in &plot.series {
            self.plot_series(&area, series);
        }

        self.end_svg();
    }

    fn plot_series(&mut self, area: &Area, series: &Series) {
        match series.marker {
            Marker::Line => {
                if series.points.is_empty() {
                    return;
                }
                let points = series
                    .points
                    .iter()
                    .map(|&(x, y)| format!("{:.2},{:.2}", area.to_x(x), area.to_y(y)))
                    .collect::<Vec<_>>()
                    .join(" ");
                let style = format!(
                    "fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\"",
                    series.color
                );
                self.emit(&format!("<polyline points=\"{}\" {} />", points, style));
            }
            Marker::Dot => {
                for &(x, y) in &series.points {
                    let pos = format!("cx=\"{:.2}\" cy=\"{:.2}\"", area.to_x(x), area.to_y(y));
                    let line = format!("<circle {} r=\"1.5\" fill=\"{}\" />", pos, series.color);
                    self.emit(&line);
                }
            }
        }
    }

    fn generate_heatmap(&mut self, heatmap: &Heatmap) {
        let num_rows = heatmap.rows.len();
        let num_cols = heatmap.rows.first().map(|row| row.len()).unwrap_or(0);
        let grid_height = num_rows as f64 * DEFAULT_ROW_HEIGHT;
        let height =
            MARGIN_TOP + grid_height + MARGIN_BOTTOM + LEGEND_HEIGHT + 2.0 * self.pad;
        self.start_svg(self.width, height);
        self.add_background();
        self.add_title(&heatmap.title);

        let x0 = MARGIN_LEFT + self.pad;
        let y0 = MARGIN_TOP + self.pad;
        let grid_width = self.width - MARGIN_LEFT - 2.0 * self.pad;
        let col_width = if num_cols == 0 {
            0.0
        } else {
            grid_width / num_cols as f64
        };

        for (row_index, row) in heatmap.rows.iter().enumerate() {
            let y = y0 + row_index as f64 * DEFAULT_ROW_HEIGHT;
            for (col_index, color) in row.iter().enumerate() {
                let x = x0 + col_index as f64 * col_width;
                self.add_rect((x, y), (col_width, DEFAULT_ROW_HEIGHT), color);
            }
        }

        for &separator in &heatmap.col_separators {
            let x = x0 + separator as f64 * col_width;
            self.add_line((x, y0), (x, y0 + grid_height), "#000000", 1.0, false);
        }

        for Tick { pos, label } in &heatmap.col_labels {
            let x = x0 + pos * col_width;
            self.add_text((x, y0 + grid_height + 16.0), label, 11, "middle");
        }

        let legend_y = y0 + grid_height + MARGIN_BOTTOM / 2.0 + 8.0;
        self.plot_legend((x0, legend_y), &heatmap.legend);
        self.end_svg();
    }

    fn plot_legend(&mut self, pos: (f64, f64), labels: &[(String, Color)]) {
        let (mut x, y) = pos;
        let size = 12.0;
        for (label, color) in labels {
            self.add_rect((x, y), (size, size), color);
            x += size + 3.0;
            self.add_text((x, y + size - 1.0), label, 12, "start");
            x += 7.0 * (label.len() as f64 + 2.0);
        }
    }

    fn add_frame(&mut self, area: &Area) {
        let dimensions = format!("width=\"{}\" height=\"{}\"", area.width, area.height);
        let pos = format!("x=\"{}\" y=\"{}\"", area.x, area.y);
        let style = r##"stroke="#000000" stroke-width="1" fill="transparent""##;
        self.emit(&format!("<rect {} {} {} />", dimensions, pos, style));

        // Zero line
        let (low, high) = area.y_range;
        if low < 0.0 && high > 0.0 {
            let y = area.to_y(0.0);
            let (left, right) = (area.x, area.x + area.width);
            self.add_line((left, y), (right, y), "#BABABA", 1.0, false);
        }
    }

    fn add_rect(&mut self, pos: (f64, f64), dims: (f64, f64), color: &Color) {
        let (x, y) = pos;
        let (w, h) = dims;
        let pos = format!("x=\"{:.2}\" y=\"{:.2}\"", x, y);
        let dim = format!("height=\"{:.2}\" width=\"{:.2}\"", h, w);
        let style = format!("fill=\"{}\" stroke=\"{}\" stroke-width=\"0\"", color, color);
        self.emit(&format!("<rect {} {} {} />", pos, dim, style));
    }

    fn add_line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, stroke: f64, dashed: bool) {
        let x1y1 = format!("x1=\"{:.2}\" y1=\"{:.2}\"", from.0, from.1);
        let x2y2 = format!("x2=\"{:.2}\" y2=\"{:.2}\"", to.0, to.1);
        let mut style = format!("stroke=\"{}\" stroke-width=\"{}\"", color, stroke);
        if dashed {
            style += " stroke-dasharray=\"4,3\"";
        }
        self.emit(&format!("<line {} {} {} />", x1y1, x2y2, style));
    }

    fn add_text(&mut self, pos: (f64, f64), text: &str, size: u32, anchor: &str) {
        let point = format!("x=\"{:.2}\" y=\"{:.2}\"", pos.0, pos.1);
        let style = format!(
            "font-family=\"sans-serif\" font-size=\"{}px\" text-anchor=\"{}\"",
            size, anchor
        );
        let line = format!("<text {} {}>{}</text>", point, style, escape(text));
        self.emit(&line);
    }

    fn add_title(&mut self, title: &str) {
        let pos = (self.width / 2.0, self.pad + MARGIN_TOP / 2.0);
        self.add_text(pos, title, 16, "middle");
    }

    fn start_svg(&mut self, width: f64, height: f64) {
        self.emit(r#"<?xml version="1.0"?>"#);
        let line = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" "#;
        self.emit(&format!("{}width=\"{}\" height=\"{}\">", line, width, height));
    }

    fn end_svg(&mut self) {
        self.emit("</svg>");
    }

    fn add_background(&mut self) {
        self.emit(r#"<rect width="100%" height="100%" fill="white"/>"#);
    }

    fn emit(&mut self, line: &str) {
        self.svg.push_str(line);
        self.svg.push('\n');
    }
}

/// Plot area in pixels together with the data ranges it displays.
struct Area {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl Area {
    fn to_x(&self, value: f64) -> f64 {
        let (low, high) = self.x_range;
        let span = if high > low { high - low } else { 1.0 };
        self.x + (value - low) / span * self.width
    }

    fn to_y(&self, value: f64) -> f64 {
        let (low, high) = self.y_range;
        let span = if high > low { high - low } else { 1.0 };
        let value = value.clamp(low, high);
        self.y + self.height - (value - low) / span * self.height
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VLine;

    fn area() -> Area {
        Area {
            x: 10.0,
            y: 20.0,
            width: 100.0,
            height: 50.0,
            x_range: (0.0, 10.0),
            y_range: (-1.0, 1.0),
        }
    }

    #[test]
    fn area_maps_data_to_pixels() {
        let area = area();
        assert_eq!(area.to_x(0.0), 10.0);
        assert_eq!(area.to_x(10.0), 110.0);
        assert_eq!(area.to_y(1.0), 20.0);
        assert_eq!(area.to_y(-1.0), 70.0);
        assert_eq!(area.to_y(5.0), 20.0);
    }

    #[test]
    fn line_plot_with_message_skips_series() {
        let mut plot = LinePlot::new("chr21", (0.0, 12.0), (-1.0, 1.0));
        plot.message = Some("Not enough genes".to_string());
        plot.series.push(Series {
            points: vec![(0.0, 1.0); 13],
            color: "#000000".to_string(),
            marker: Marker::Line,
        });
        let svg = generate_string(&Figure::Line(plot));
        assert!(svg.contains("Not enough genes"));
        assert!(!svg.contains("<polyline"));
    }

    #[test]
    fn line_plot_draws_dots_and_separators() {
        let mut plot = LinePlot::new("genome", (0.0, 3.0), (-1.0, 1.0));
        plot.series.push(Series {
            points: vec![(0.0, 0.5), (1.0, -0.5)],
            color: "#E3371E".to_string(),
            marker: Marker::Dot,
        });
        plot.vlines.push(VLine {
            pos: 2.0,
            color: "#000000".to_string(),
            dashed: true,
        });
        let svg = generate_string(&Figure::Line(plot));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn heatmap_draws_one_rect_per_cell() {
        let heatmap = Heatmap {
            title: "cells <1>".to_string(),
            rows: vec![vec!["#FFFFFF".to_string(); 3]; 2],
            col_separators: vec![1],
            col_labels: vec![Tick {
                pos: 0.5,
                label: "1".to_string(),
            }],
            legend: vec![("-1".to_string(), "#0049FF".to_string())],
        };
        let svg = generate_string(&Figure::Heat(heatmap));
        // background + 6 grid cells + 1 legend box
        assert_eq!(svg.matches("<rect").count(), 8);
        assert!(svg.contains("cells &lt;1&gt;"));
    }
}
