use alloy_primitives::Address;
use chainfolio_core::{
    config::Config,
    session::Session,
    wallet::{self, StaticWallet},
};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{self, WrapErr as _, eyre};
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{chart, portfolio, render};

#[derive(Parser, Debug)]
#[command(name = "chainfolio", about = "Multi-chain wallet portfolio viewer")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
pub(crate) struct WalletArgs {
    /// Use this address instead of asking the wallet provider
    #[arg(long)]
    pub(crate) address: Option<Address>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the networks the portfolio is aggregated over
    Chains,

    /// Ask the wallet provider for an account and print it
    Connect,

    /// Show token balances and USD prices across all chains
    Portfolio(portfolio::Portfolio),

    /// Show the price chart of a token held in the portfolio
    Chart(chart::Chart),
}

impl Cli {
    pub(crate) async fn run(
        self,
        config: Config,
        shutdown_token: CancellationToken,
    ) -> eyre::Result<()> {
        let command = async {
            match self.command {
                Commands::Chains => {
                    print!("{}", render::chains_table(&config.chains()));
                    Ok(())
                }
                Commands::Connect => {
                    let wallet = config.build_wallet(config.http_client()?);
                    let address = wallet::connect(&wallet)
                        .await
                        .wrap_err("failed to connect wallet")?;
                    println!("{address}");
                    Ok(())
                }
                Commands::Portfolio(cmd) => cmd.run(&config).await,
                Commands::Chart(cmd) => cmd.run(&config).await,
            }
        };

        select! {
            res = command => res,
            _ = shutdown_token.cancelled() => Err(eyre!("command cancelled")),
        }
    }
}

impl WalletArgs {
    /// Connects (to `--address` if given, the configured wallet otherwise) and
    /// loads the portfolio into a fresh session.
    pub(crate) async fn load_session(&self, config: &Config) -> eyre::Result<Session> {
        let client = config.http_client()?;
        let aggregator = config.build_aggregator(client.clone());
        let mut session = Session::new();

        let address = match self.address {
            Some(address) => {
                session
                    .connect_and_refresh(&StaticWallet::new(address), &aggregator)
                    .await
            }
            None => {
                session
                    .connect_and_refresh(&config.build_wallet(client), &aggregator)
                    .await
            }
        }
        .wrap_err("failed to load portfolio")?;

        info!(%address, tokens = session.tokens().len(), "portfolio loaded");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn test_parse_portfolio_with_address() {
        let cli = Cli::try_parse_from([
            "chainfolio",
            "portfolio",
            "--address",
            "0x742d35Cc6634C0532925a3b844Bc454e4438f44e",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Portfolio(cmd) => {
                assert_eq!(
                    cmd.wallet.address,
                    Some(Address::from_str("0x742d35Cc6634C0532925a3b844Bc454e4438f44e").unwrap())
                );
                assert!(cmd.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_chart_symbol() {
        let cli = Cli::try_parse_from(["chainfolio", "chart", "eth"]).unwrap();
        match cli.command {
            Commands::Chart(cmd) => {
                assert_eq!(cmd.symbol, "eth");
                assert!(cmd.wallet.address.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_invalid_address_is_rejected() {
        assert!(Cli::try_parse_from(["chainfolio", "portfolio", "--address", "0x1234"]).is_err());
    }

    #[test]
    fn test_chart_requires_symbol() {
        assert!(Cli::try_parse_from(["chainfolio", "chart"]).is_err());
    }
}
