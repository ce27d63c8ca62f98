use chainfolio_core::config::Config;
use color_eyre::eyre::{self, WrapErr as _};

use crate::{cli::WalletArgs, render};

#[derive(clap::Args, Debug)]
pub(crate) struct Chart {
    /// Symbol of a token in the portfolio, e.g. ETH
    pub(crate) symbol: String,

    #[clap(flatten)]
    pub(crate) wallet: WalletArgs,

    /// Print the series as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl Chart {
    pub(crate) async fn run(&self, config: &Config) -> eyre::Result<()> {
        let mut session = self.wallet.load_session(config).await?;
        let series = session.show_chart(&self.symbol)?;

        if self.json {
            let json =
                serde_json::to_string_pretty(series).wrap_err("failed to serialize chart")?;
            println!("{json}");
        } else {
            print!("{}", render::chart(series));
        }
        Ok(())
    }
}
