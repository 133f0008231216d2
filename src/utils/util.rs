pub type Result<T> = std::result::Result<T, String>;

pub fn handle_error_and_exit(err: String) -> ! {
    log::error!("{}", err);
    std::process::exit(1);
}

/// Strips an optional `chr` prefix and parses the remainder as a chromosome
/// number, e.g. `chr7` and `7` both give 7. Sex and other contigs give None.
pub fn autosome_number(contig: &str) -> Option<u32> {
    let name = contig
        .strip_prefix("chr")
        .or_else(|| contig.strip_prefix("Chr"))
        .unwrap_or(contig);
    name.parse::<u32>().ok().filter(|&n| n > 0)
}
