use crate::error::{Error, Result};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "monte_carlo_pi",
    version,
    about = "Estimate pi by Monte Carlo sampling across parallel workers"
)]
pub struct Cli {
    /// Total number of points to sample.
    #[arg(allow_negative_numbers = true)]
    pub total_points: i64,
    /// Number of worker threads.
    #[arg(allow_negative_numbers = true)]
    pub thread_count: i64,
}

/// Validated run parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub total_points: u64,
    pub workers: usize,
}

impl Config {
    /// Points handed to each worker. The remainder of the division is dropped.
    pub fn points_per_worker(&self) -> u64 {
        self.total_points / self.workers as u64
    }

    /// Points that will actually be drawn if no worker stops early.
    pub fn effective_points(&self) -> u64 {
        self.points_per_worker() * self.workers as u64
    }
}

impl TryFrom<Cli> for Config {
    type Error = Error;

    fn try_from(cli: Cli) -> Result<Self> {
        let total_points = positive("total_points", cli.total_points)?;
        let workers = positive("thread_count", cli.thread_count)?;
        Ok(Config {
            total_points,
            workers: workers as usize,
        })
    }
}

fn positive(name: &'static str, value: i64) -> Result<u64> {
    if value < 1 {
        return Err(Error::NonPositive { name, value });
    }
    Ok(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config> {
        let cli = Cli::try_parse_from(std::iter::once("monte_carlo_pi").chain(args.iter().copied()))
            .expect("clap should accept integer arguments");
        Config::try_from(cli)
    }

    #[test]
    fn accepts_positive_arguments() {
        let config = parse(&["1000", "4"]).unwrap();
        assert_eq!(
            config,
            Config {
                total_points: 1000,
                workers: 4
            }
        );
    }

    #[test]
    fn rejects_zero_points() {
        let err = parse(&["0", "4"]).unwrap_err();
        assert!(matches!(
            err,
            Error::NonPositive {
                name: "total_points",
                value: 0
            }
        ));
    }

    #[test]
    fn rejects_negative_thread_count() {
        let err = parse(&["100", "-3"]).unwrap_err();
        assert!(matches!(
            err,
            Error::NonPositive {
                name: "thread_count",
                value: -3
            }
        ));
        assert!(err.to_string().starts_with("Arguments must be positive integers."));
    }

    #[test]
    fn rejects_non_numeric_arguments() {
        assert!(Cli::try_parse_from(["monte_carlo_pi", "lots", "4"]).is_err());
    }

    #[test]
    fn remainder_points_are_dropped() {
        let config = Config {
            total_points: 10,
            workers: 3,
        };
        assert_eq!(config.points_per_worker(), 3);
        assert_eq!(config.effective_points(), 9);
    }

    #[test]
    fn more_workers_than_points_gives_empty_budgets() {
        let config = Config {
            total_points: 2,
            workers: 5,
        };
        assert_eq!(config.points_per_worker(), 0);
        assert_eq!(config.effective_points(), 0);
    }
}
