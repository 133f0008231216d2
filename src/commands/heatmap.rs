use super::initialize_thread_pool;
use crate::cli::HeatmapArgs;
use crate::cnv::{build_heatmap_grid, HeatmapParams, ScanError};
use crate::input::{read_cell_list_path, CellGroups, ExpressionMatrix, GenePositions};
use crate::render::heatmap_figure;
use crate::utils::Result;
use trackplot::generate_image;

pub fn heatmap(args: HeatmapArgs) -> Result<()> {
    let matrix = ExpressionMatrix::from_path(&args.matrix_path)?;
    log::info!(
        "Loaded expression of {} genes in {} cells",
        matrix.num_genes(),
        matrix.num_cells()
    );
    let positions = GenePositions::from_path(&args.positions_path)?;
    let groups = CellGroups::from_path(&args.cells_path, &matrix)?;

    let display = match (&args.display_cells_path, &args.subject) {
        (Some(_), Some(_)) => {
            return Err("A display cell list cannot be combined with a subject".to_string())
        }
        (Some(path), None) => read_cell_list_path(path, &matrix)?,
        (None, subject) => groups.target_for_subject(subject.as_deref()),
    };
    if display.is_empty() {
        if let Some(subject) = &args.subject {
            return Err(ScanError::MissingSubjectCells {
                subject: subject.clone(),
            }
            .into());
        }
    }
    log::info!("Displaying {} cells", display.len());

    let params = HeatmapParams {
        window: args.window,
        num_autosomes: args.num_autosomes,
        exp_thresh: args.exp_thresh,
        clip_thresh: args.clip_thresh,
        cluster_chroms: args.cluster_chroms.clone(),
    };
    let pool = initialize_thread_pool(args.num_threads)?;
    let grid = pool
        .install(|| build_heatmap_grid(&matrix, groups.reference(), &display, &positions, &params))?;

    let title = match &args.subject {
        Some(subject) => format!("{}: difference to reference", subject),
        None => "Difference to reference".to_string(),
    };
    generate_image(
        &heatmap_figure(&grid, &title, args.clip_thresh),
        &args.output_path,
    )?;
    log::info!(
        "Heatmap of {} cells x {} genes written to {}",
        grid.cells.len(),
        grid.genes.len(),
        args.output_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_data::write_inputs;
    use std::{fs, path::Path};

    fn args(dir: &Path) -> HeatmapArgs {
        HeatmapArgs {
            matrix_path: dir.join("matrix.tsv"),
            positions_path: dir.join("positions.tsv"),
            cells_path: dir.join("cells.tsv"),
            output_path: dir.join("cells.svg"),
            display_cells_path: None,
            subject: None,
            window: 5,
            cluster_chroms: Some(vec![2]),
            exp_thresh: 5.0,
            clip_thresh: 30.0,
            num_threads: 2,
            num_autosomes: 3,
        }
    }

    #[test]
    fn heatmap_writes_image() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        heatmap(args(dir.path())).unwrap();
        let svg = fs::read_to_string(dir.path().join("cells.svg")).unwrap();
        assert!(svg.contains("<rect"));
    }

    #[test]
    fn heatmap_display_list() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        let list = dir.path().join("display.txt");
        fs::write(&list, "a0\nb0\n").unwrap();
        let args = HeatmapArgs {
            display_cells_path: Some(list),
            cluster_chroms: None,
            ..args(dir.path())
        };
        heatmap(args).unwrap();
        assert!(dir.path().join("cells.svg").exists());
    }

    #[test]
    fn heatmap_display_list_with_subject_err() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        let list = dir.path().join("display.txt");
        fs::write(&list, "a0\n").unwrap();
        let args = HeatmapArgs {
            display_cells_path: Some(list),
            subject: Some("P1".to_string()),
            ..args(dir.path())
        };
        assert!(heatmap(args).is_err());
        assert!(!dir.path().join("cells.svg").exists());
    }

    #[test]
    fn heatmap_window_too_wide_err() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        let args = HeatmapArgs {
            window: 45,
            ..args(dir.path())
        };
        assert!(heatmap(args).is_err());
    }

    #[test]
    fn heatmap_unknown_subject_err() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        let args = HeatmapArgs {
            subject: Some("P9".to_string()),
            ..args(dir.path())
        };
        let err = heatmap(args).unwrap_err();
        assert!(err.contains("P9"));
    }
}
