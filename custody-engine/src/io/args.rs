use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file (TOML, YAML or JSON). STRANDS_* variables override it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Straddle size bought in the replayed scenario
    #[arg(long, default_value = "1")]
    pub amount: Decimal,

    /// Strike price listed on the simulated market
    #[arg(long, default_value = "1500")]
    pub strike_price: Decimal,

    /// Append custody events to this CSV file
    #[arg(long)]
    pub journal: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["custody-engine"]);
        assert_eq!(args.amount, dec!(1));
        assert_eq!(args.strike_price, dec!(1500));
        assert!(args.config.is_none());
        assert!(args.journal.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "custody-engine",
            "--amount",
            "2.5",
            "--strike-price",
            "1700",
            "--journal",
            "custody.csv",
        ]);
        assert_eq!(args.amount, dec!(2.5));
        assert_eq!(args.strike_price, dec!(1700));
        assert_eq!(args.journal, Some(PathBuf::from("custody.csv")));
    }
}
