//! Chart Models
//!
//! Data and styling for the spending charts. Each chart serialises to a
//! Chart.js configuration that the host page hands to the canvas.

use serde_json::{json, Value};

use super::format::chart_date_label;
use crate::api::{SpendingAnalysis, SpendingTrends};

/// Trend line color
pub const LINE_COLOR: &str = "#2563eb";
/// Fill under the trend line
pub const LINE_FILL: &str = "rgba(37, 99, 235, 0.1)";

/// Category slice colors, darkest first
pub const CATEGORY_COLORS: [&str; 5] = [
    "#2563eb", // Blue 600
    "#3b82f6", // Blue 500
    "#60a5fa", // Blue 400
    "#93c5fd", // Blue 300
    "#bfdbfe", // Blue 200
];

const TOOLTIP: (&str, &str, &str) = ("#1e293b", "#f1f5f9", "#334155");

/// Daily spending line chart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineChart {
    labels: Vec<String>,
    data: Vec<f64>,
    revision: u64,
}

impl LineChart {
    pub const LABEL: &'static str = "Daily Spending";
    pub const TENSION: f64 = 0.4;
    pub const POINT_RADIUS: u32 = 4;
    pub const POINT_HOVER_RADIUS: u32 = 6;

    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the series. Dates become `Jan 5` style labels.
    pub fn update(&mut self, trends: &SpendingTrends) {
        self.labels = trends.dates.iter().map(|d| chart_date_label(d)).collect();
        self.data = trends.amounts.clone();
        self.revision += 1;
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Number of updates applied
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn to_config(&self) -> Value {
        let (tooltip_bg, tooltip_text, tooltip_border) = TOOLTIP;
        json!({
            "type": "line",
            "data": {
                "labels": self.labels,
                "datasets": [{
                    "label": Self::LABEL,
                    "data": self.data,
                    "borderColor": LINE_COLOR,
                    "backgroundColor": LINE_FILL,
                    "fill": true,
                    "tension": Self::TENSION,
                    "pointRadius": Self::POINT_RADIUS,
                    "pointHoverRadius": Self::POINT_HOVER_RADIUS,
                }]
            },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": {
                    "legend": { "display": false },
                    "tooltip": {
                        "mode": "index",
                        "intersect": false,
                        "backgroundColor": tooltip_bg,
                        "titleColor": tooltip_text,
                        "bodyColor": tooltip_text,
                        "borderColor": tooltip_border,
                        "borderWidth": 1,
                        "padding": 12,
                        "displayColors": false,
                    }
                },
                "scales": { "y": { "beginAtZero": true } },
                "interaction": { "intersect": false, "mode": "index" }
            }
        })
    }
}

/// Spending-by-category doughnut chart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoughnutChart {
    labels: Vec<String>,
    data: Vec<f64>,
    revision: u64,
}

impl DoughnutChart {
    pub const CUTOUT: &'static str = "75%";

    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slices, keeping the backend's category order
    pub fn update(&mut self, analysis: &SpendingAnalysis) {
        self.labels = analysis.category_totals.keys().cloned().collect();
        self.data = analysis.category_totals.values().copied().collect();
        self.revision += 1;
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn to_config(&self) -> Value {
        json!({
            "type": "doughnut",
            "data": {
                "labels": self.labels,
                "datasets": [{
                    "data": self.data,
                    "backgroundColor": CATEGORY_COLORS,
                    "borderWidth": 0,
                }]
            },
            "options": {
                "responsive": true,
                "maintainAspectRatio": false,
                "plugins": {
                    "legend": {
                        "position": "right",
                        "labels": {
                            "padding": 20,
                            "usePointStyle": true,
                            "pointStyle": "circle",
                        }
                    }
                },
                "cutout": Self::CUTOUT,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn analysis() -> SpendingAnalysis {
        let mut totals = IndexMap::new();
        totals.insert("Rent".to_string(), 1200.0);
        totals.insert("Groceries".to_string(), 310.4);
        totals.insert("Coffee".to_string(), 18.0);
        SpendingAnalysis {
            spending_trends: SpendingTrends {
                dates: vec!["2024-01-05".to_string(), "2024-01-06".to_string()],
                amounts: vec![42.0, 13.5],
            },
            category_totals: totals,
        }
    }

    #[test]
    fn test_line_chart_update() {
        let mut chart = LineChart::new();
        assert_eq!(chart.revision(), 0);

        chart.update(&analysis().spending_trends);
        assert_eq!(chart.labels(), ["Jan 5", "Jan 6"]);
        assert_eq!(chart.data(), [42.0, 13.5]);
        assert_eq!(chart.revision(), 1);

        chart.update(&SpendingTrends::default());
        assert!(chart.labels().is_empty());
        assert_eq!(chart.revision(), 2);
    }

    #[test]
    fn test_line_chart_config() {
        let mut chart = LineChart::new();
        chart.update(&analysis().spending_trends);
        let config = chart.to_config();

        assert_eq!(config["type"], "line");
        let dataset = &config["data"]["datasets"][0];
        assert_eq!(dataset["label"], "Daily Spending");
        assert_eq!(dataset["borderColor"], "#2563eb");
        assert_eq!(dataset["backgroundColor"], "rgba(37, 99, 235, 0.1)");
        assert_eq!(dataset["tension"], 0.4);
        assert_eq!(dataset["pointRadius"], 4);
        assert_eq!(config["data"]["labels"][1], "Jan 6");
    }

    #[test]
    fn test_doughnut_keeps_category_order() {
        let mut chart = DoughnutChart::new();
        chart.update(&analysis());

        assert_eq!(chart.labels(), ["Rent", "Groceries", "Coffee"]);
        assert_eq!(chart.data(), [1200.0, 310.4, 18.0]);

        let config = chart.to_config();
        assert_eq!(config["type"], "doughnut");
        assert_eq!(config["options"]["cutout"], "75%");
        assert_eq!(config["data"]["datasets"][0]["backgroundColor"][0], "#2563eb");
        assert_eq!(config["data"]["datasets"][0]["backgroundColor"][4], "#bfdbfe");
    }
}
