use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::Duration,
};

use alloy_primitives::Address;
use color_eyre::eyre::{self, WrapErr as _, eyre};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    aggregator::Aggregator,
    chain::{Chain, NativeCoin, supported_chains},
    collector::{MockTokenSource, RpcTokenSource, TokenSource},
    price::{CoinGeckoPriceSource, DEFAULT_PRICE_API_URL},
    wallet::JsonRpcWallet,
};

pub const CONFIG_FILE: &str = "chainfolio.yaml";
pub const ENV_PREFIX: &str = "CHAINFOLIO_";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Networks to aggregate over, in display order
    pub chains: Vec<ChainConfig>,

    /// Where token balances come from
    pub token_source: TokenSourceKind,

    /// ERC-20 tokens to read when `token_source` is `rpc`
    pub tokens: Vec<TokenConfig>,

    pub price: PriceConfig,

    pub wallet: WalletConfig,

    /// Per-request timeout, humantime format (e.g. "10s")
    pub request_timeout: String,

    /// Upper bound on chains processed at once
    pub max_concurrency: usize,

    pub server: ServerConfig,

    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSourceKind {
    Mock,
    Rpc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub name: String,
    pub chain_id: u64,
    pub native: NativeCoin,
    /// JSON-RPC endpoint, only needed by the `rpc` token source
    #[serde(default)]
    pub rpc_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub deployments: Vec<TokenDeployment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDeployment {
    pub chain_id: u64,
    pub address: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceConfig {
    pub api_url: String,

    /// Symbol to price-API id, e.g. `eth: ethereum`. Unlisted symbols use the lowercase symbol.
    pub ids: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// JSON-RPC endpoint of the wallet bridge. No url means no wallet is installed.
    pub rpc_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chains: supported_chains()
                .into_iter()
                .map(|chain| ChainConfig {
                    name: chain.name,
                    chain_id: chain.chain_id,
                    native: chain.native,
                    rpc_url: chain.rpc_url,
                })
                .collect(),
            token_source: TokenSourceKind::Mock,
            tokens: Vec::new(),
            price: PriceConfig::default(),
            wallet: WalletConfig::default(),
            request_timeout: "10s".to_string(),
            max_concurrency: 1,
            server: ServerConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_PRICE_API_URL.to_string(),
            ids: HashMap::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Config {
    /// Load configuration from defaults, `chainfolio.yaml` and `CHAINFOLIO_*` env vars
    pub fn load() -> eyre::Result<Self> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Yaml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> eyre::Result<Self> {
        let config: Config = figment.extract().wrap_err("failed to extract config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> eyre::Result<()> {
        if self.max_concurrency == 0 {
            return Err(eyre!("max_concurrency must be at least 1"));
        }

        let mut seen = HashSet::new();
        for chain in &self.chains {
            if !seen.insert(chain.chain_id) {
                return Err(eyre!("duplicate chain id {}", chain.chain_id));
            }
        }

        for token in &self.tokens {
            for deployment in &token.deployments {
                if !seen.contains(&deployment.chain_id) {
                    return Err(eyre!(
                        "token {} is deployed on unconfigured chain {}",
                        token.symbol,
                        deployment.chain_id
                    ));
                }
            }
        }

        self.request_timeout()?;
        Ok(())
    }

    pub fn request_timeout(&self) -> eyre::Result<Duration> {
        humantime::parse_duration(&self.request_timeout)
            .wrap_err_with(|| format!("invalid request_timeout {:?}", self.request_timeout))
    }

    pub fn chains(&self) -> Vec<Chain> {
        self.chains
            .iter()
            .map(|c| Chain::new(&c.name, c.chain_id, c.native.clone(), c.rpc_url.clone()))
            .collect()
    }

    /// HTTP client shared by the price source and the wallet connector.
    pub fn http_client(&self) -> eyre::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request_timeout()?)
            .build()
            .wrap_err("failed to build http client")
    }

    pub fn build_aggregator(&self, client: reqwest::Client) -> Aggregator {
        let token_source: Arc<dyn TokenSource> = match self.token_source {
            TokenSourceKind::Mock => Arc::new(MockTokenSource),
            TokenSourceKind::Rpc => Arc::new(RpcTokenSource::new(&self.tokens)),
        };
        let price_source = Arc::new(CoinGeckoPriceSource::new(
            client,
            &self.price.api_url,
            &self.price.ids,
        ));

        let chains = self.chains();
        for chain in &chains {
            info!(chain.name = %chain.name, chain.id = chain.chain_id, "🔗 Initialized chain info from config");
        }

        Aggregator::new(chains, token_source, price_source)
            .with_max_concurrency(self.max_concurrency)
    }

    pub fn build_wallet(&self, client: reqwest::Client) -> JsonRpcWallet {
        JsonRpcWallet::new(client, self.wallet.rpc_url.clone())
    }
}
