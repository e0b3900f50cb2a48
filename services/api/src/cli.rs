use crate::demo::{run_demo, run_match, run_quote, DemoArgs, MatchArgs, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use transport_token::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Transport Token",
    about = "Price freight, estimate its carbon footprint and rank carriers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print an itemized quote for a single shipment
    Quote(QuoteArgs),
    /// Rank carriers from a roster CSV export against a shipment
    Match(MatchArgs),
    /// Walk through quoting, emissions and carrier matching end to end
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override APP_CATALOG_PATH with a JSON reference catalog
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quote(args) => run_quote(args),
        Command::Match(args) => run_match(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quote_flags() {
        let cli = Cli::try_parse_from([
            "transport-token-api",
            "quote",
            "--from",
            "Paris",
            "--to",
            "Berlin",
            "--to-country",
            "DE",
            "--weight",
            "18000",
            "--eco",
            "hvo",
            "--fuel",
            "b100",
            "--night",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Quote(args)) => {
                assert_eq!(args.to_country, "DE");
                assert_eq!(args.eco, transport_token::freight::EcoOption::Hvo);
                assert_eq!(args.fuel, Some(transport_token::freight::FuelType::B100));
                assert!(args.night);
                assert!(!args.urgent);
            }
            other => panic!("expected quote command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(Cli::try_parse_from([
            "transport-token-api",
            "quote",
            "--from-coord",
            "48.85",
            "--weight",
            "100",
        ])
        .is_err());
        assert!(Cli::try_parse_from([
            "transport-token-api",
            "quote",
            "--from",
            "Paris",
            "--weight",
            "100",
            "--eco",
            "solar",
        ])
        .is_err());
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["transport-token-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
