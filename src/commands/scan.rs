use super::initialize_thread_pool;
use crate::cli::ScanArgs;
use crate::cnv::{scan_genome, ScanParams};
use crate::input::{ArmBreakpoints, CellGroups, ExpressionMatrix, GenePositions};
use crate::render::{chromosome_figure, genome_figure};
use crate::utils::{tagged_path, Result};
use trackplot::generate_image;

pub fn scan(args: ScanArgs) -> Result<()> {
    let matrix = ExpressionMatrix::from_path(&args.matrix_path)?;
    log::info!(
        "Loaded expression of {} genes in {} cells",
        matrix.num_genes(),
        matrix.num_cells()
    );
    let positions = GenePositions::from_path(&args.positions_path)?;
    log::info!("Loaded positions of {} genes", positions.len());
    let groups = CellGroups::from_path(&args.cells_path, &matrix)?;
    let arms = ArmBreakpoints::new(&args.arms)?;

    let params = ScanParams {
        window: args.window,
        num_autosomes: args.num_autosomes,
    };
    let pool = initialize_thread_pool(args.num_threads)?;
    let genome = pool.install(|| {
        scan_genome(
            &matrix,
            &groups,
            &positions,
            Some(&arms),
            &params,
            args.subject.as_deref(),
        )
    })?;

    let title = match &args.subject {
        Some(subject) => format!("{} vs reference", subject),
        None => "Target vs reference".to_string(),
    };
    generate_image(&genome_figure(&genome, &title, args.margin), &args.output_path)?;
    log::info!("Genome track written to {}", args.output_path.display());

    if args.per_chromosome {
        for track in &genome.tracks {
            let path = tagged_path(&args.output_path, &format!("chr{}", track.chrom()));
            let chrom_title = format!("{}, chromosome {}", title, track.chrom());
            generate_image(&chromosome_figure(track, &chrom_title), &path)?;
            log::debug!("Chromosome {} track written to {}", track.chrom(), path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_data::write_inputs;
    use std::{fs, path::Path};

    fn args(dir: &Path) -> ScanArgs {
        ScanArgs {
            matrix_path: dir.join("matrix.tsv"),
            positions_path: dir.join("positions.tsv"),
            cells_path: dir.join("cells.tsv"),
            output_path: dir.join("genome.svg"),
            subject: None,
            window: 5,
            arms: "hg19".to_string(),
            per_chromosome: false,
            num_threads: 2,
            num_autosomes: 3,
            margin: 0.0,
        }
    }

    #[test]
    fn scan_writes_genome_image() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        scan(args(dir.path())).unwrap();
        let svg = fs::read_to_string(dir.path().join("genome.svg")).unwrap();
        assert!(svg.contains("<svg"));
        assert!(!dir.path().join("genome.chr1.svg").exists());
    }

    #[test]
    fn scan_per_chromosome_images() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        let args = ScanArgs {
            per_chromosome: true,
            subject: Some("P1".to_string()),
            ..args(dir.path())
        };
        scan(args).unwrap();
        for chrom in 1..=3 {
            assert!(dir.path().join(format!("genome.chr{}.svg", chrom)).exists());
        }
    }

    #[test]
    fn scan_unknown_subject_err() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        let args = ScanArgs {
            subject: Some("P9".to_string()),
            ..args(dir.path())
        };
        let err = scan(args).unwrap_err();
        assert!(err.contains("P9"));
        assert!(!dir.path().join("genome.svg").exists());
    }
}
