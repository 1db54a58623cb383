//! Environment overrides live in their own test binary so the variables set
//! here never reach the unit tests that load config files.

use custody_engine::StrandsConfig;
use rust_decimal_macros::dec;
use std::io::Write;
use std::path::Path;

#[test]
fn environment_overrides_file_values() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "iterations = 3\nmin_total_cost = \"0.5\"\nmax_total_cost = \"250\"\njournal_path = \"custody.csv\""
    )
    .unwrap();

    std::env::set_var("STRANDS_ITERATIONS", "7");
    std::env::set_var("STRANDS_MAX_TOTAL_COST", "99.5");

    let config = StrandsConfig::load(Some(file.path())).unwrap();

    std::env::remove_var("STRANDS_ITERATIONS");
    std::env::remove_var("STRANDS_MAX_TOTAL_COST");

    assert_eq!(config.iterations(), 7);
    assert_eq!(config.max_total_cost(), Some(dec!(99.5)));
    assert_eq!(config.min_total_cost(), dec!(0.5));
    assert_eq!(config.journal_path(), Some(Path::new("custody.csv")));
}
