use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum Color {
    Black,
    Gray,
    LightGray,
    Blue,
    Red,
    Teal,
    /// Position on the blue-white-red scale, 0.0 is blue and 1.0 is red
    Diverging(f64),
}

impl fmt::Display for Color {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::Black => write!(formatter, "#000000"),
            Color::Gray => write!(formatter, "#7F7F7F"),
            Color::LightGray => write!(formatter, "#D1D1D1"),
            Color::Blue => write!(formatter, "#1383C6"),
            Color::Red => write!(formatter, "#E3371E"),
            Color::Teal => write!(formatter, "#009CA2"),
            Color::Diverging(value) => write!(formatter, "{}", get_gradient(*value)),
        }
    }
}

fn get_gradient(value: f64) -> String {
    let blue: (u8, u8, u8) = (0, 73, 255);
    let white: (u8, u8, u8) = (255, 255, 255);
    let red: (u8, u8, u8) = (255, 0, 0);
    let value = value.clamp(0.0, 1.0);
    let (from, to, frac) = if value < 0.5 {
        (blue, white, value * 2.0)
    } else {
        (white, red, (value - 0.5) * 2.0)
    };
    let mix = |a: u8, b: u8| (a as f64 * (1.0 - frac) + b as f64 * frac).round() as u8;
    format!(
        "#{:02X}{:02X}{:02X}",
        mix(from.0, to.0),
        mix(from.1, to.1),
        mix(from.2, to.2)
    )
}

/// Maps values in [-limit, limit] onto the diverging scale and back.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    limit: f64,
}

impl ColorScale {
    pub fn symmetric(limit: f64) -> Self {
        Self { limit }
    }

    pub fn color(&self, value: f64) -> Color {
        if self.limit <= 0.0 {
            return Color::Diverging(0.5);
        }
        Color::Diverging(((value + self.limit) / (2.0 * self.limit)).clamp(0.0, 1.0))
    }

    pub fn value_at(&self, fraction: f64) -> f64 {
        -self.limit + 2.0 * self.limit * fraction.clamp(0.0, 1.0)
    }

    /// Evenly spaced labeled swatches from -limit to limit.
    pub fn legend(&self, steps: usize) -> Vec<(String, Color)> {
        let steps = steps.max(2);
        (0..steps)
            .map(|step| {
                let fraction = step as f64 / (steps - 1) as f64;
                let value = self.value_at(fraction);
                (format!("{:.2}", value), Color::Diverging(fraction))
            })
            .collect()
    }
}
