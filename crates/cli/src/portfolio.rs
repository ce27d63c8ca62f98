use chainfolio_core::config::Config;
use color_eyre::eyre::{self, OptionExt as _, WrapErr as _};

use crate::{cli::WalletArgs, render};

#[derive(clap::Args, Debug)]
pub(crate) struct Portfolio {
    #[clap(flatten)]
    pub(crate) wallet: WalletArgs,

    /// Print the portfolio as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl Portfolio {
    pub(crate) async fn run(&self, config: &Config) -> eyre::Result<()> {
        let session = self.wallet.load_session(config).await?;
        let portfolio = session
            .portfolio()
            .ok_or_eyre("session has no connected wallet")?;

        if self.json {
            let json = serde_json::to_string_pretty(&portfolio)
                .wrap_err("failed to serialize portfolio")?;
            println!("{json}");
        } else {
            print!("{}", render::portfolio_table(&portfolio, &config.chains()));
        }
        Ok(())
    }
}
