use std::sync::Arc;

use chainfolio_core::{aggregator::Aggregator, chain::Chain};

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
}

impl AppState {
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }

    pub fn chains(&self) -> &[Chain] {
        self.aggregator.chains()
    }
}
