pub type Color = String;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Marker {
    Line,
    Dot,
}

/// A run of (x, y) points drawn with one color and marker.
#[derive(Debug)]
pub struct Series {
    pub points: Vec<(f64, f64)>,
    pub color: Color,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub pos: f64,
    pub label: String,
}

#[derive(Debug)]
pub struct VLine {
    pub pos: f64,
    pub color: Color,
    pub dashed: bool,
}

#[derive(Debug)]
pub struct LinePlot {
    pub title: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub series: Vec<Series>,
    pub vlines: Vec<VLine>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    /// Drawn across the plot area when set, e.g. in place of missing data
    pub message: Option<String>,
}

impl LinePlot {
    pub fn new(title: &str, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            title: title.to_string(),
            x_range,
            y_range,
            series: Vec::new(),
            vlines: Vec::new(),
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
            message: None,
        }
    }
}

/// Rows are samples, columns are positions. All rows must have equal length.
#[derive(Debug)]
pub struct Heatmap {
    pub title: String,
    pub rows: Vec<Vec<Color>>,
    pub col_separators: Vec<usize>,
    pub col_labels: Vec<Tick>,
    pub legend: Vec<(String, Color)>,
}

#[derive(Debug)]
pub enum Figure {
    Line(LinePlot),
    Heat(Heatmap),
}
