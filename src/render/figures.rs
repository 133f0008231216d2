use super::{Color, ColorScale};
use crate::cnv::{ChromosomeTrack, GenomeTrack, HeatmapGrid};
use trackplot::{Figure, Heatmap, LinePlot, Marker, Series, Tick, VLine};

const MIN_Y_LIMIT: f64 = 0.5;
const LEGEND_STEPS: usize = 5;

fn y_limit(values: &[f64]) -> f64 {
    let max_abs = values
        .iter()
        .map(|v| v.abs())
        .fold(0.0_f64, f64::max);
    (max_abs * 1.1).max(MIN_Y_LIMIT)
}

fn y_ticks(limit: f64) -> Vec<Tick> {
    [-limit, 0.0, limit]
        .into_iter()
        .map(|pos| Tick {
            pos,
            label: format!("{:.2}", pos),
        })
        .collect()
}

/// Whole-genome track: one dot series per chromosome with separators between
/// chromosomes and a tick label at the middle of each.
pub fn genome_figure(genome: &GenomeTrack, title: &str, margin: f64) -> Figure {
    let smoothed: Vec<f64> = genome
        .tracks
        .iter()
        .filter(|track| !track.is_placeholder())
        .flat_map(|track| track.values().iter().copied())
        .collect();
    let limit = y_limit(&smoothed);
    let x_max = genome.values.len().saturating_sub(1) as f64 + 2.0 * margin;
    let mut plot = LinePlot::new(title, (0.0, x_max.max(1.0)), (-limit, limit));

    for (index, (track, bounds)) in genome
        .tracks
        .iter()
        .zip(genome.boundaries.windows(2))
        .enumerate()
    {
        let color = if track.is_placeholder() {
            Color::LightGray
        } else if index % 2 == 0 {
            Color::Black
        } else {
            Color::Gray
        };
        let points: Vec<(f64, f64)> = track
            .values()
            .iter()
            .enumerate()
            .map(|(offset, &value)| ((bounds[0] + offset) as f64 + margin, value))
            .collect();
        plot.series.push(Series {
            points,
            color: color.to_string(),
            marker: Marker::Dot,
        });
    }

    plot.vlines = genome
        .separators(margin)
        .into_iter()
        .map(|pos| VLine {
            pos,
            color: Color::Gray.to_string(),
            dashed: true,
        })
        .collect();
    plot.x_ticks = genome
        .tick_positions(margin)
        .into_iter()
        .map(|(chrom, pos)| Tick {
            pos,
            label: chrom.to_string(),
        })
        .collect();
    plot.y_ticks = y_ticks(limit);
    Figure::Line(plot)
}

/// Single chromosome track split into p and q arms at the breakpoint. A
/// placeholder track is drawn as a message instead of data.
pub fn chromosome_figure(track: &ChromosomeTrack, title: &str) -> Figure {
    let values = track.values();
    if let Some(message) = track.message() {
        let mut plot = LinePlot::new(title, (0.0, 1.0), (-1.0, 1.0));
        plot.message = Some(message);
        return Figure::Line(plot);
    }

    let limit = y_limit(values);
    let x_max = values.len().saturating_sub(1).max(1) as f64;
    let mut plot = LinePlot::new(title, (0.0, x_max), (-limit, limit));
    plot.y_ticks = y_ticks(limit);

    let arms = track.arms();
    if arms.is_empty() {
        plot.series.push(Series {
            points: values.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect(),
            color: Color::Black.to_string(),
            marker: Marker::Line,
        });
        return Figure::Line(plot);
    }

    for (label, range) in arms {
        let color = if label == "p" { Color::Blue } else { Color::Red };
        plot.x_ticks.push(Tick {
            pos: (range.start + range.end - 1) as f64 / 2.0,
            label: format!("{}{}", track.chrom(), label),
        });
        plot.series.push(Series {
            points: range.map(|i| (i as f64, values[i])).collect(),
            color: color.to_string(),
            marker: Marker::Line,
        });
    }
    if let ChromosomeTrack::Smoothed {
        breakpoint: Some(breakpoint),
        ..
    } = track
    {
        plot.vlines.push(VLine {
            pos: *breakpoint as f64,
            color: Color::Teal.to_string(),
            dashed: true,
        });
    }
    Figure::Line(plot)
}

/// Cell-by-gene heatmap on the diverging scale of `clip_thresh`.
pub fn heatmap_figure(grid: &HeatmapGrid, title: &str, clip_thresh: f64) -> Figure {
    let scale = ColorScale::symmetric(clip_thresh);
    let rows: Vec<Vec<String>> = grid
        .values
        .iter()
        .map(|row| row.iter().map(|&v| scale.color(v).to_string()).collect())
        .collect();

    let num_cols = grid.genes.len();
    let col_separators: Vec<usize> = grid
        .chromosome_boundaries
        .iter()
        .map(|&(_, first)| first)
        .filter(|&first| first > 0)
        .collect();
    let col_labels: Vec<Tick> = grid
        .chromosome_boundaries
        .iter()
        .enumerate()
        .map(|(index, &(chrom, first))| {
            let next = grid
                .chromosome_boundaries
                .get(index + 1)
                .map_or(num_cols, |&(_, next)| next);
            Tick {
                pos: (first + next) as f64 / 2.0,
                label: chrom.to_string(),
            }
        })
        .collect();
    let legend: Vec<(String, String)> = scale
        .legend(LEGEND_STEPS)
        .into_iter()
        .map(|(label, color)| (label, color.to_string()))
        .collect();

    Figure::Heat(Heatmap {
        title: title.to_string(),
        rows,
        col_separators,
        col_labels,
        legend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smoothed(chrom: u32, values: Vec<f64>, breakpoint: Option<usize>) -> ChromosomeTrack {
        let positions = (0..values.len() as u64).collect();
        ChromosomeTrack::Smoothed {
            chrom,
            values,
            positions,
            breakpoint,
        }
    }

    #[test]
    fn genome_figure_one_series_per_chromosome() {
        let genome = GenomeTrack::from_tracks(vec![
            smoothed(1, vec![0.1, 0.2, -0.3], None),
            ChromosomeTrack::Insufficient {
                chrom: 2,
                genes: 3,
                window: 5,
                values: crate::cnv::placeholder(),
            },
        ]);
        let Figure::Line(plot) = genome_figure(&genome, "sample", 2.0) else {
            panic!("expected line plot");
        };
        assert_eq!(plot.series.len(), 2);
        assert_eq!(plot.series[0].points[0], (2.0, 0.1));
        assert_eq!(plot.series[1].color, Color::LightGray.to_string());
        assert_eq!(plot.vlines.len(), 1);
        assert_eq!(plot.vlines[0].pos, 5.0);
        let labels: Vec<&str> = plot.x_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2"]);
        // placeholder values do not stretch the y axis
        assert_eq!(plot.y_range, (-MIN_Y_LIMIT, MIN_Y_LIMIT));
    }

    #[test]
    fn chromosome_figure_splits_arms() {
        let track = smoothed(3, vec![0.0, 0.1, 0.2, 0.3, 0.4], Some(2));
        let Figure::Line(plot) = chromosome_figure(&track, "chr3") else {
            panic!("expected line plot");
        };
        assert_eq!(plot.series.len(), 2);
        assert_eq!(plot.series[0].points.len(), 2);
        assert_eq!(plot.series[1].points.len(), 3);
        let labels: Vec<&str> = plot.x_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["3p", "3q"]);
        assert_eq!(plot.vlines[0].pos, 2.0);
    }

    #[test]
    fn chromosome_figure_placeholder_message() {
        let track = ChromosomeTrack::Insufficient {
            chrom: 21,
            genes: 4,
            window: 101,
            values: crate::cnv::placeholder(),
        };
        let Figure::Line(plot) = chromosome_figure(&track, "chr21") else {
            panic!("expected line plot");
        };
        assert!(plot.series.is_empty());
        assert!(plot.message.unwrap().contains("Chromosome 21"));
    }

    #[test]
    fn heatmap_figure_layout() {
        let grid = HeatmapGrid {
            genes: (0..6).map(|i| format!("G{}", i)).collect(),
            cells: vec!["t1".to_string(), "t2".to_string()],
            values: vec![vec![-1.0, 0.0, 1.0, 0.0, 0.0, 0.0], vec![0.0; 6]],
            chromosome_boundaries: vec![(1, 0), (2, 4)],
        };
        let Figure::Heat(heatmap) = heatmap_figure(&grid, "cells", 1.0) else {
            panic!("expected heatmap");
        };
        assert_eq!(heatmap.rows.len(), 2);
        assert_eq!(heatmap.rows[0][0], "#0049FF");
        assert_eq!(heatmap.rows[0][2], "#FF0000");
        assert_eq!(heatmap.col_separators, vec![4]);
        assert_eq!(heatmap.col_labels[0].pos, 2.0);
        assert_eq!(heatmap.col_labels[1].pos, 5.0);
        assert_eq!(heatmap.legend.len(), LEGEND_STEPS);
    }
}
