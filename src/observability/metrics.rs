use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub upstream_requests_total: IntCounterVec,
    pub upstream_latency_seconds: HistogramVec,
    pub orders_created_total: IntCounter,
    pub tracking_lookups_total: IntCounterVec,
    pub active_sessions: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let upstream_requests_total = IntCounterVec::new(
            Opts::new(
                "upstream_requests_total",
                "Upstream requests by resource and outcome",
            ),
            &["resource", "outcome"],
        )
        .expect("valid upstream_requests_total metric");

        let upstream_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "upstream_latency_seconds",
                "Latency of upstream requests in seconds",
            ),
            &["resource"],
        )
        .expect("valid upstream_latency_seconds metric");

        let orders_created_total =
            IntCounter::new("orders_created_total", "Orders created through the order form")
                .expect("valid orders_created_total metric");

        let tracking_lookups_total = IntCounterVec::new(
            Opts::new("tracking_lookups_total", "Tracking lookups by outcome"),
            &["outcome"],
        )
        .expect("valid tracking_lookups_total metric");

        let active_sessions = IntGauge::new("active_sessions", "Currently signed-in sessions")
            .expect("valid active_sessions metric");

        registry
            .register(Box::new(upstream_requests_total.clone()))
            .expect("register upstream_requests_total");
        registry
            .register(Box::new(upstream_latency_seconds.clone()))
            .expect("register upstream_latency_seconds");
        registry
            .register(Box::new(orders_created_total.clone()))
            .expect("register orders_created_total");
        registry
            .register(Box::new(tracking_lookups_total.clone()))
            .expect("register tracking_lookups_total");
        registry
            .register(Box::new(active_sessions.clone()))
            .expect("register active_sessions");

        Self {
            registry,
            upstream_requests_total,
            upstream_latency_seconds,
            orders_created_total,
            tracking_lookups_total,
            active_sessions,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
