use serde::Serialize;

const MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
const VALUES: [f64; 6] = [100.0, 200.0, 300.0, 250.0, 400.0, 500.0];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// A labelled series of (category, value) points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|p| p.label.as_str())
    }

    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }
}

/// Placeholder six-month price series for `symbol`. Not backed by real history.
pub fn synthetic_series(symbol: &str) -> ChartSeries {
    ChartSeries {
        label: format!("{} Price", symbol.to_uppercase()),
        points: MONTHS
            .iter()
            .zip(VALUES)
            .map(|(month, value)| ChartPoint {
                label: month.to_string(),
                value,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_has_six_monthly_points() {
        let series = synthetic_series("eth");

        assert_eq!(series.label, "ETH Price");
        assert_eq!(series.points.len(), 6);
        assert_eq!(
            series.labels().collect::<Vec<_>>(),
            vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"]
        );
        assert_eq!(series.max_value(), Some(500.0));
    }

    #[test]
    fn test_series_does_not_depend_on_symbol() {
        let eth = synthetic_series("ETH");
        let bnb = synthetic_series("BNB");
        assert_eq!(eth.points, bnb.points);
        assert_ne!(eth.label, bnb.label);
    }
}
