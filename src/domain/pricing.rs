//! Pricing recommendation value objects as returned by the estimation service.
//!
//! Wire names are camelCase; `costAnalysis` keeps the order of the incoming
//! JSON object because that order is the display order.

use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRecommendation {
    pub recommended_price: f64,
    pub price_range: PriceRange,
    pub market_analysis: MarketAnalysis,
    pub cost_analysis: CostBreakdown,
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub minimum: f64,
    pub maximum: f64,
    pub optimal: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub average_market_price: f64,
    /// `None` when the service omitted the field; an empty list is invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitor_prices: Option<Vec<f64>>,
    pub demand_level: DemandLevel,
    pub seasonal_trend: SeasonalTrend,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandLevel {
    Low,
    Medium,
    High,
}

impl DemandLevel {
    pub fn label(&self) -> &'static str {
        match self {
            DemandLevel::Low => "Low",
            DemandLevel::Medium => "Medium",
            DemandLevel::High => "High",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalTrend {
    Increasing,
    Stable,
    Decreasing,
}

impl SeasonalTrend {
    pub fn label(&self) -> &'static str {
        match self {
            SeasonalTrend::Increasing => "Increasing",
            SeasonalTrend::Stable => "Stable",
            SeasonalTrend::Decreasing => "Decreasing",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SeasonalTrend::Increasing => "↗",
            SeasonalTrend::Stable => "→",
            SeasonalTrend::Decreasing => "↘",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    #[serde(alias = "reason")]
    pub suggestion: String,
    #[serde(default)]
    pub impact: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Increase,
    Bundle,
    Seasonal,
    #[serde(other)]
    Other,
}

impl RecommendationKind {
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationKind::Increase => "Price increase",
            RecommendationKind::Bundle => "Bundle",
            RecommendationKind::Seasonal => "Seasonal",
            RecommendationKind::Other => "Tip",
        }
    }
}

/// One row of the cost breakdown, e.g. `materials → 800`.
#[derive(Clone, Debug, PartialEq)]
pub struct CostLine {
    pub category: String,
    pub amount: f64,
}

impl CostLine {
    pub fn new(category: impl Into<String>, amount: f64) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }

    /// `suggestedProfit` → `Suggested Profit`.
    pub fn label(&self) -> String {
        let mut label = String::with_capacity(self.category.len() + 4);
        for (idx, ch) in self.category.chars().enumerate() {
            if idx == 0 {
                label.extend(ch.to_uppercase());
            } else if ch.is_uppercase() {
                label.push(' ');
                label.push(ch);
            } else if ch == '_' {
                label.push(' ');
            } else {
                label.push(ch);
            }
        }
        label
    }
}

/// Ordered mapping from cost category to amount.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CostBreakdown(Vec<CostLine>);

impl CostBreakdown {
    pub fn new(lines: Vec<CostLine>) -> Self {
        Self(lines)
    }

    pub fn lines(&self) -> &[CostLine] {
        &self.0
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|line| line.amount).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CostBreakdown {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for line in &self.0 {
            map.serialize_entry(&line.category, &line.amount)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CostBreakdown {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedCosts;

        impl<'de> Visitor<'de> for OrderedCosts {
            type Value = CostBreakdown;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of cost category to amount")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut lines = Vec::with_capacity(access.size_hint().unwrap_or(4));
                while let Some((category, amount)) = access.next_entry::<String, f64>()? {
                    // A repeated key replaces the earlier amount but keeps its slot.
                    if let Some(existing) = lines
                        .iter_mut()
                        .find(|line: &&mut CostLine| line.category == category)
                    {
                        existing.amount = amount;
                    } else {
                        lines.push(CostLine { category, amount });
                    }
                }
                Ok(CostBreakdown(lines))
            }
        }

        deserializer.deserialize_map(OrderedCosts)
    }
}

/// A price the artisan can pick in the pricing panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceCandidate {
    pub tier: PriceTier,
    pub price: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceTier {
    Recommended,
    Conservative,
    Premium,
    MarketAverage,
}

impl PriceTier {
    pub fn label(&self) -> &'static str {
        match self {
            PriceTier::Recommended => "Recommended",
            PriceTier::Conservative => "Conservative",
            PriceTier::Premium => "Premium",
            PriceTier::MarketAverage => "Market average",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            PriceTier::Recommended => "Best balance of demand and margin",
            PriceTier::Conservative => "Sells faster, thinner margin",
            PriceTier::Premium => "For signature or limited pieces",
            PriceTier::MarketAverage => "In line with similar listings",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidRecommendation {
    #[error("recommended price {price} outside range {minimum}..={maximum}")]
    OutOfRange {
        price: f64,
        minimum: f64,
        maximum: f64,
    },
    #[error("optimal price {optimal} outside range {minimum}..={maximum}")]
    OptimalOutOfRange {
        optimal: f64,
        minimum: f64,
        maximum: f64,
    },
    #[error("competitor prices present but empty")]
    EmptyCompetitors,
    #[error("confidence {0} outside 0..=1")]
    Confidence(f64),
    #[error("negative or non-finite amount for {0}")]
    Amount(String),
}

impl PricingRecommendation {
    /// Checks the range, confidence and amount invariants, reporting the first violation.
    pub fn validate(&self) -> Result<(), InvalidRecommendation> {
        let amounts = [
            ("recommendedPrice", self.recommended_price),
            ("priceRange.minimum", self.price_range.minimum),
            ("priceRange.maximum", self.price_range.maximum),
            ("priceRange.optimal", self.price_range.optimal),
            (
                "marketAnalysis.averageMarketPrice",
                self.market_analysis.average_market_price,
            ),
        ];
        for (field, value) in amounts {
            if !is_amount(value) {
                return Err(InvalidRecommendation::Amount(field.to_string()));
            }
        }
        if let Some(prices) = self.market_analysis.competitor_prices.as_deref() {
            if prices.is_empty() {
                return Err(InvalidRecommendation::EmptyCompetitors);
            }
            if prices.iter().any(|price| !is_amount(*price)) {
                return Err(InvalidRecommendation::Amount(
                    "marketAnalysis.competitorPrices".to_string(),
                ));
            }
        }
        if let Some(line) = self
            .cost_analysis
            .lines()
            .iter()
            .find(|line| !is_amount(line.amount))
        {
            return Err(InvalidRecommendation::Amount(format!(
                "costAnalysis.{}",
                line.category
            )));
        }

        let PriceRange {
            minimum,
            maximum,
            optimal,
        } = self.price_range;
        if !(minimum..=maximum).contains(&self.recommended_price) {
            return Err(InvalidRecommendation::OutOfRange {
                price: self.recommended_price,
                minimum,
                maximum,
            });
        }
        if !(minimum..=maximum).contains(&optimal) {
            return Err(InvalidRecommendation::OptimalOutOfRange {
                optimal,
                minimum,
                maximum,
            });
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(InvalidRecommendation::Confidence(self.confidence));
        }
        Ok(())
    }

    pub fn competitor_min(&self) -> Option<f64> {
        self.competitors().reduce(f64::min)
    }

    pub fn competitor_max(&self) -> Option<f64> {
        self.competitors().reduce(f64::max)
    }

    fn competitors(&self) -> impl Iterator<Item = f64> + '_ {
        self.market_analysis
            .competitor_prices
            .iter()
            .flatten()
            .copied()
    }

    /// Prices offered in the panel, in display order.
    pub fn candidate_prices(&self) -> [PriceCandidate; 4] {
        [
            PriceCandidate {
                tier: PriceTier::Recommended,
                price: self.recommended_price,
            },
            PriceCandidate {
                tier: PriceTier::Conservative,
                price: self.price_range.minimum,
            },
            PriceCandidate {
                tier: PriceTier::Premium,
                price: self.price_range.maximum,
            },
            PriceCandidate {
                tier: PriceTier::MarketAverage,
                price: self.market_analysis.average_market_price,
            },
        ]
    }

    /// Confidence as a whole percentage for display.
    pub fn confidence_pct(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

fn is_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "recommendedPrice": 3000,
            "priceRange": { "minimum": 2400, "maximum": 4000, "optimal": 3000 },
            "marketAnalysis": {
                "averageMarketPrice": 3100,
                "competitorPrices": [2900, 3300, 2700],
                "demandLevel": "medium",
                "seasonalTrend": "stable"
            },
            "costAnalysis": { "overhead": 200, "materials": 900, "labor": 1100 },
            "confidence": 0.7,
            "reasoning": ["Hand-dyed fabric", "Festival season"],
            "recommendations": [
                { "type": "bundle", "reason": "Pair with matching cushion covers", "impact": "+12% basket size" },
                { "type": "holiday", "suggestion": "Gift wrapping", "impact": "Higher conversion" }
            ]
        }"#
    }

    #[test]
    fn decodes_camel_case_payload() {
        let rec: PricingRecommendation = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(rec.recommended_price, 3000.0);
        assert_eq!(rec.price_range.maximum, 4000.0);
        assert_eq!(rec.market_analysis.demand_level, DemandLevel::Medium);
        assert_eq!(rec.market_analysis.seasonal_trend, SeasonalTrend::Stable);
        assert_eq!(rec.recommendations[0].kind, RecommendationKind::Bundle);
        assert_eq!(
            rec.recommendations[0].suggestion,
            "Pair with matching cushion covers"
        );
        assert_eq!(rec.recommendations[1].kind, RecommendationKind::Other);
        assert!(rec.validate().is_ok());
    }

    #[test]
    fn cost_breakdown_keeps_wire_order() {
        let rec: PricingRecommendation = serde_json::from_str(sample_json()).unwrap();
        let categories: Vec<_> = rec
            .cost_analysis
            .lines()
            .iter()
            .map(|line| line.category.as_str())
            .collect();
        assert_eq!(categories, ["overhead", "materials", "labor"]);
        assert_eq!(rec.cost_analysis.total(), 2200.0);

        let encoded = serde_json::to_string(&rec.cost_analysis).unwrap();
        assert_eq!(encoded, r#"{"overhead":200.0,"materials":900.0,"labor":1100.0}"#);
    }

    #[test]
    fn cost_labels_split_camel_case() {
        assert_eq!(CostLine::new("suggestedProfit", 1.0).label(), "Suggested Profit");
        assert_eq!(CostLine::new("materials", 1.0).label(), "Materials");
    }

    #[test]
    fn validate_rejects_price_outside_range() {
        let mut rec: PricingRecommendation = serde_json::from_str(sample_json()).unwrap();
        rec.recommended_price = 5000.0;
        assert!(matches!(
            rec.validate(),
            Err(InvalidRecommendation::OutOfRange { .. })
        ));
    }

    #[test]
    fn validate_rejects_optimal_outside_range() {
        let mut rec: PricingRecommendation = serde_json::from_str(sample_json()).unwrap();
        rec.price_range.optimal = 9999.0;
        assert!(matches!(
            rec.validate(),
            Err(InvalidRecommendation::OptimalOutOfRange { optimal, .. }) if optimal == 9999.0
        ));
    }

    #[test]
    fn validate_rejects_present_but_empty_competitors() {
        let mut rec: PricingRecommendation = serde_json::from_str(sample_json()).unwrap();
        rec.market_analysis.competitor_prices = Some(Vec::new());
        assert_eq!(rec.validate(), Err(InvalidRecommendation::EmptyCompetitors));
    }

    #[test]
    fn missing_competitors_are_allowed() {
        let json = sample_json().replace(r#""competitorPrices": [2900, 3300, 2700],"#, "");
        let rec: PricingRecommendation = serde_json::from_str(&json).unwrap();
        assert_eq!(rec.market_analysis.competitor_prices, None);
        assert!(rec.validate().is_ok());
        assert_eq!(rec.competitor_min(), None);
    }

    #[test]
    fn validate_rejects_confidence_above_one() {
        let mut rec: PricingRecommendation = serde_json::from_str(sample_json()).unwrap();
        rec.confidence = 1.2;
        assert_eq!(rec.validate(), Err(InvalidRecommendation::Confidence(1.2)));
    }

    #[test]
    fn validate_rejects_negative_cost() {
        let mut rec: PricingRecommendation = serde_json::from_str(sample_json()).unwrap();
        rec.cost_analysis = CostBreakdown::new(vec![CostLine::new("labor", -1.0)]);
        assert_eq!(
            rec.validate(),
            Err(InvalidRecommendation::Amount("costAnalysis.labor".to_string()))
        );
    }

    #[test]
    fn competitor_extremes_and_candidates() {
        let rec: PricingRecommendation = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(rec.competitor_min(), Some(2700.0));
        assert_eq!(rec.competitor_max(), Some(3300.0));

        let prices: Vec<_> = rec.candidate_prices().iter().map(|c| c.price).collect();
        assert_eq!(prices, [3000.0, 2400.0, 4000.0, 3100.0]);
        assert_eq!(rec.confidence_pct(), 70);
    }
}
