use chainfolio_core::portfolio::Portfolio;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioResponse {
    #[serde(flatten)]
    pub portfolio: Portfolio,
    pub total_value_usd: f64,
}

impl From<Portfolio> for PortfolioResponse {
    fn from(portfolio: Portfolio) -> Self {
        let total_value_usd = portfolio.total_value_usd();
        Self {
            portfolio,
            total_value_usd,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
