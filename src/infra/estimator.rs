//! Pricing estimators and the data source that never fails.
//!
//! - [`HttpEstimator`] posts the product to `/api/ai/analyze-pricing`.
//! - [`FallbackEstimator`] serves a fixed demo recommendation.
//! - [`PricingDataSource`] tries the primary estimator once and absorbs any
//!   failure into the fallback.

use std::{
    sync::Arc,
    time::{Duration, SystemTime},
};

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{
    pricing::InvalidRecommendation, CostBreakdown, CostLine, DemandLevel, MarketAnalysis,
    PriceRange, PricingRecommendation, ProductDescriptor, Recommendation, RecommendationKind,
    SeasonalTrend,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const ANALYZE_PATH: &str = "api/ai/analyze-pricing";
const USER_AGENT: &str = concat!("kala-ai/", env!("CARGO_PKG_VERSION"));

/// Why a live estimate could not be used.
#[derive(Debug, Error)]
pub enum EstimatorError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("estimator responded with {0}")]
    Status(StatusCode),
    #[error("failed to decode estimate: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("estimate rejected: {0}")]
    Invalid(#[from] InvalidRecommendation),
    #[error("no pricing service available")]
    Offline,
}

#[async_trait]
pub trait PricingEstimator: Send + Sync {
    async fn estimate(
        &self,
        product: &ProductDescriptor,
        language: &str,
    ) -> Result<PricingRecommendation, EstimatorError>;
}

#[async_trait]
impl<T: PricingEstimator + ?Sized> PricingEstimator for Arc<T> {
    async fn estimate(
        &self,
        product: &ProductDescriptor,
        language: &str,
    ) -> Result<PricingRecommendation, EstimatorError> {
        (**self).estimate(product, language).await
    }
}

/// Data source shared through the UI context.
pub type SharedDataSource = PricingDataSource<Arc<dyn PricingEstimator>>;

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    product: &'a ProductDescriptor,
    language: &'a str,
}

/// Network-backed estimator.
#[derive(Clone, Debug)]
pub struct HttpEstimator {
    http: Client,
    endpoint: Url,
}

impl HttpEstimator {
    pub fn with_base_url(base: &str, timeout: Duration) -> Result<Self, EstimatorError> {
        // Without a trailing slash `join` would replace the last path segment.
        let base_url = if base.ends_with('/') {
            Url::parse(base)?
        } else {
            Url::parse(&format!("{base}/"))?
        };
        let endpoint = base_url.join(ANALYZE_PATH)?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PricingEstimator for HttpEstimator {
    async fn estimate(
        &self,
        product: &ProductDescriptor,
        language: &str,
    ) -> Result<PricingRecommendation, EstimatorError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&AnalyzeRequest { product, language })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EstimatorError::Status(status));
        }

        let body = response.bytes().await?;
        let recommendation: PricingRecommendation = serde_json::from_slice(&body)?;
        recommendation.validate()?;
        Ok(recommendation)
    }
}

/// Serves the demo recommendation regardless of input.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackEstimator;

impl FallbackEstimator {
    pub fn recommendation(&self) -> PricingRecommendation {
        fallback_recommendation()
    }
}

#[async_trait]
impl PricingEstimator for FallbackEstimator {
    async fn estimate(
        &self,
        _product: &ProductDescriptor,
        _language: &str,
    ) -> Result<PricingRecommendation, EstimatorError> {
        Ok(self.recommendation())
    }
}

/// Used when no HTTP client could be built; every estimate fails over.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineEstimator;

#[async_trait]
impl PricingEstimator for OfflineEstimator {
    async fn estimate(
        &self,
        _product: &ProductDescriptor,
        _language: &str,
    ) -> Result<PricingRecommendation, EstimatorError> {
        Err(EstimatorError::Offline)
    }
}

/// The fixed recommendation shown whenever the live estimator is unavailable.
pub fn fallback_recommendation() -> PricingRecommendation {
    PricingRecommendation {
        recommended_price: 2500.0,
        price_range: PriceRange {
            minimum: 2000.0,
            maximum: 3500.0,
            optimal: 2500.0,
        },
        market_analysis: MarketAnalysis {
            average_market_price: 2800.0,
            competitor_prices: Some(vec![2200.0, 2600.0, 3000.0, 2400.0, 2900.0]),
            demand_level: DemandLevel::High,
            seasonal_trend: SeasonalTrend::Increasing,
        },
        cost_analysis: CostBreakdown::new(vec![
            CostLine::new("materials", 800.0),
            CostLine::new("labor", 1200.0),
            CostLine::new("overhead", 300.0),
            CostLine::new("suggestedProfit", 500.0),
        ]),
        confidence: 0.85,
        reasoning: vec![
            "Handcrafted pieces command a premium over machine-made alternatives".to_string(),
            "Demand for this category is currently high".to_string(),
            "The festive season is approaching, which lifts gifting purchases".to_string(),
            "Material and labor costs support this price point".to_string(),
        ],
        recommendations: vec![
            Recommendation {
                kind: RecommendationKind::Increase,
                suggestion: "Consider raising the price by 10-15% during the festive season"
                    .to_string(),
                impact: "Higher margin per sale".to_string(),
            },
            Recommendation {
                kind: RecommendationKind::Bundle,
                suggestion: "Offer bundles with complementary products".to_string(),
                impact: "Larger average order value".to_string(),
            },
            Recommendation {
                kind: RecommendationKind::Seasonal,
                suggestion: "Feature the piece in festive gift collections".to_string(),
                impact: "More visibility during peak demand".to_string(),
            },
        ],
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EstimateOrigin {
    Live,
    Fallback,
}

/// A recommendation tagged with where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Estimate {
    pub data: PricingRecommendation,
    pub origin: EstimateOrigin,
    pub fetched_at: SystemTime,
}

impl Estimate {
    fn new(data: PricingRecommendation, origin: EstimateOrigin) -> Self {
        Self {
            data,
            origin,
            fetched_at: SystemTime::now(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == EstimateOrigin::Fallback
    }
}

/// Primary estimator with a constant fallback. Holds no mutable state, so
/// concurrent fetches are independent.
#[derive(Clone, Debug)]
pub struct PricingDataSource<P> {
    primary: P,
    fallback: FallbackEstimator,
}

impl PricingDataSource<HttpEstimator> {
    pub fn http(base_url: &str, timeout: Duration) -> Result<Self, EstimatorError> {
        Ok(Self::new(HttpEstimator::with_base_url(base_url, timeout)?))
    }
}

impl<P: PricingEstimator> PricingDataSource<P> {
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            fallback: FallbackEstimator,
        }
    }

    /// Always yields a displayable recommendation.
    pub async fn fetch_recommendation(
        &self,
        product: &ProductDescriptor,
        language: &str,
    ) -> PricingRecommendation {
        self.fetch_estimate(product, language).await.data
    }

    /// Like [`fetch_recommendation`](Self::fetch_recommendation) but reports
    /// whether the live estimator answered.
    #[tracing::instrument(skip_all, fields(category = %product.category, language = %language))]
    pub async fn fetch_estimate(&self, product: &ProductDescriptor, language: &str) -> Estimate {
        match self.primary.estimate(product, language).await {
            Ok(recommendation) => {
                info!(
                    recommended = recommendation.recommended_price,
                    confidence = recommendation.confidence,
                    "received live pricing estimate"
                );
                Estimate::new(recommendation, EstimateOrigin::Live)
            }
            Err(error) => {
                warn!(%error, "pricing estimate unavailable; serving fallback");
                Estimate::new(self.fallback.recommendation(), EstimateOrigin::Fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    use super::*;

    const LIVE_BODY: &str = r#"{
        "recommendedPrice": 3000,
        "priceRange": { "minimum": 2400, "maximum": 4000, "optimal": 3000 },
        "marketAnalysis": {
            "averageMarketPrice": 3200,
            "competitorPrices": [2800, 3400],
            "demandLevel": "medium",
            "seasonalTrend": "stable"
        },
        "costAnalysis": { "materials": 1000, "labor": 1400 },
        "confidence": 0.9,
        "reasoning": ["Intricate zari work"],
        "recommendations": []
    }"#;

    fn product() -> ProductDescriptor {
        ProductDescriptor {
            name: "Banarasi Silk Dupatta".to_string(),
            category: "Textiles".to_string(),
            materials: vec!["Silk".to_string(), "Zari".to_string()],
            ..Default::default()
        }
    }

    /// Serves one canned HTTP response and hands back the raw request.
    async fn serve_once(
        status_line: &'static str,
        body: impl Into<String>,
    ) -> (String, JoinHandle<String>) {
        let body = body.into();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
            request
        });
        (base, handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn source(base: &str) -> PricingDataSource<HttpEstimator> {
        PricingDataSource::http(base, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn live_response_passes_through_unchanged() {
        let (base, server) = serve_once("200 OK", LIVE_BODY).await;

        let estimate = source(&base).fetch_estimate(&product(), "hi").await;
        let expected: PricingRecommendation = serde_json::from_str(LIVE_BODY).unwrap();

        assert_eq!(estimate.origin, EstimateOrigin::Live);
        assert_eq!(estimate.data, expected);
        assert_eq!(estimate.data.recommended_price, 3000.0);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/ai/analyze-pricing HTTP/1.1"));
        assert!(request
            .to_ascii_lowercase()
            .contains("content-type: application/json"));
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent["language"], "hi");
        assert_eq!(sent["product"]["category"], "Textiles");
        assert_eq!(sent["product"]["materials"][1], "Zari");
    }

    #[tokio::test]
    async fn server_error_falls_back() {
        let (base, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;

        let estimate = source(&base).fetch_estimate(&product(), "en").await;
        server.await.unwrap();

        assert!(estimate.is_fallback());
        assert_eq!(estimate.data, fallback_recommendation());
    }

    #[tokio::test]
    async fn malformed_json_falls_back() {
        let (base, server) = serve_once("200 OK", "{\"recommendedPrice\": ").await;

        let recommendation = source(&base).fetch_recommendation(&product(), "en").await;
        server.await.unwrap();

        assert_eq!(recommendation, fallback_recommendation());
        assert_eq!(recommendation.recommended_price, 2500.0);
        assert_eq!(recommendation.confidence, 0.85);
    }

    #[tokio::test]
    async fn empty_competitor_list_falls_back() {
        let body = LIVE_BODY.replace("[2800, 3400]", "[]");
        let (base, server) = serve_once("200 OK", body).await;

        let estimate = source(&base).fetch_estimate(&product(), "en").await;
        server.await.unwrap();

        assert!(estimate.is_fallback());
        assert_eq!(estimate.data, fallback_recommendation());
    }

    #[tokio::test]
    async fn invariant_violation_falls_back() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{
                "recommendedPrice": 9000,
                "priceRange": { "minimum": 100, "maximum": 200, "optimal": 150 },
                "marketAnalysis": { "averageMarketPrice": 150, "competitorPrices": [150], "demandLevel": "low", "seasonalTrend": "decreasing" },
                "costAnalysis": {},
                "confidence": 0.5
            }"#,
        )
        .await;

        let estimate = source(&base).fetch_estimate(&product(), "en").await;
        server.await.unwrap();

        assert!(estimate.is_fallback());
    }

    #[tokio::test]
    async fn unreachable_service_falls_back() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let estimate = source(&base).fetch_estimate(&product(), "en").await;

        assert!(estimate.is_fallback());
        assert_eq!(estimate.data.recommended_price, 2500.0);
    }

    #[tokio::test]
    async fn http_estimator_surfaces_status_errors() {
        let (base, server) = serve_once("503 Service Unavailable", "{}").await;
        let estimator = HttpEstimator::with_base_url(&base, Duration::from_secs(5)).unwrap();

        let result = estimator.estimate(&product(), "en").await;
        server.await.unwrap();

        assert!(matches!(
            result,
            Err(EstimatorError::Status(StatusCode::SERVICE_UNAVAILABLE))
        ));
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let estimator =
            HttpEstimator::with_base_url("https://kala.example/v1", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            estimator.endpoint().as_str(),
            "https://kala.example/v1/api/ai/analyze-pricing"
        );
        assert!(HttpEstimator::with_base_url("not a url", DEFAULT_TIMEOUT).is_err());
    }

    struct Failing;

    #[async_trait]
    impl PricingEstimator for Failing {
        async fn estimate(
            &self,
            _product: &ProductDescriptor,
            _language: &str,
        ) -> Result<PricingRecommendation, EstimatorError> {
            Err(EstimatorError::Status(StatusCode::BAD_GATEWAY))
        }
    }

    #[tokio::test]
    async fn any_primary_failure_yields_the_fallback_constants() {
        let recommendation = PricingDataSource::new(Failing)
            .fetch_recommendation(&product(), "en")
            .await;

        assert_eq!(recommendation.price_range.minimum, 2000.0);
        assert_eq!(recommendation.price_range.maximum, 3500.0);
        assert_eq!(recommendation.market_analysis.average_market_price, 2800.0);
        assert_eq!(
            recommendation.market_analysis.competitor_prices,
            Some(vec![2200.0, 2600.0, 3000.0, 2400.0, 2900.0])
        );
        assert_eq!(recommendation.market_analysis.demand_level, DemandLevel::High);
        assert_eq!(
            recommendation.market_analysis.seasonal_trend,
            SeasonalTrend::Increasing
        );
        let last = recommendation.cost_analysis.lines().last();
        assert_eq!(
            last.map(|line| (line.category.as_str(), line.amount)),
            Some(("suggestedProfit", 500.0))
        );
        assert_eq!(recommendation.cost_analysis.total(), 2800.0);
        assert!(recommendation.validate().is_ok());
    }

    #[tokio::test]
    async fn fallback_estimator_never_fails() {
        let result = FallbackEstimator.estimate(&product(), "ta").await.unwrap();
        assert_eq!(result, fallback_recommendation());
    }

    #[tokio::test]
    async fn shared_offline_source_reports_fallback_origin() {
        let source: SharedDataSource = PricingDataSource::new(Arc::new(OfflineEstimator));
        let estimate = source.fetch_estimate(&product(), "bn").await;
        assert!(estimate.is_fallback());
        assert_eq!(estimate.data, fallback_recommendation());
    }
}
