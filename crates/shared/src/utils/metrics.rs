use prometheus_client::{
    encoding::{EncodeLabelSet, EncodeLabelValue, text::encode},
    metrics::{
        counter::Counter,
        family::Family,
        histogram::{Histogram, exponential_buckets},
    },
    registry::Registry,
};

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct OperationLabels {
    pub operation: String,
    pub method: Method,
    pub status: Status,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct DurationLabels {
    pub operation: String,
}

fn duration_histogram() -> Histogram {
    Histogram::new(exponential_buckets(0.005, 2.0, 12))
}

/// Per-operation request counters and latency histograms. Clones share state.
#[derive(Clone, Debug)]
pub struct Metrics {
    requests: Family<OperationLabels, Counter>,
    duration: Family<DurationLabels, Histogram, fn() -> Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            requests: Family::default(),
            duration: Family::new_with_constructor(duration_histogram),
        }
    }

    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "operations",
            "Operations handled, by outcome",
            self.requests.clone(),
        );
        registry.register(
            "operation_duration_seconds",
            "Operation latency in seconds",
            self.duration.clone(),
        );
    }

    pub fn record(&self, operation: &str, method: Method, status: Status, elapsed_secs: f64) {
        self.requests
            .get_or_create(&OperationLabels {
                operation: operation.to_string(),
                method,
                status,
            })
            .inc();
        self.duration
            .get_or_create(&DurationLabels {
                operation: operation.to_string(),
            })
            .observe(elapsed_secs);
    }
}

pub fn render_metrics(registry: &Registry) -> Result<String, std::fmt::Error> {
    let mut buffer = String::new();
    encode(&mut buffer, registry)?;
    Ok(buffer)
}
