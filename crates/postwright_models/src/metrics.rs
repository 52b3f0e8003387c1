//! Metrics for model API calls.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static METRICS: OnceLock<ModelMetrics> = OnceLock::new();

/// OpenTelemetry instruments for text and image model calls.
///
/// Labeled with provider and model name. Without an installed meter
/// provider every instrument is a no-op.
#[derive(Clone)]
pub struct ModelMetrics {
    _meter: Meter,
    /// Total model API requests
    pub requests: Counter<u64>,
    /// Failed model API requests
    pub errors: Counter<u64>,
    /// Model API call duration in seconds
    pub duration: Histogram<f64>,
    /// Images decoded from model responses
    pub images: Counter<u64>,
    /// Placeholder images written in place of generated ones
    pub placeholders: Counter<u64>,
}

impl ModelMetrics {
    fn init() -> Self {
        let meter = global::meter("postwright_models");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("model.requests")
                .with_description("Total model API requests")
                .build(),
            errors: meter
                .u64_counter("model.errors")
                .with_description("Failed model API requests")
                .build(),
            duration: meter
                .f64_histogram("model.duration")
                .with_unit("seconds")
                .with_description("Model API call duration")
                .build(),
            images: meter
                .u64_counter("model.images")
                .with_description("Images returned by the image model")
                .build(),
            placeholders: meter
                .u64_counter("model.images.placeholder")
                .with_description("Placeholder images written after image generation failed")
                .build(),
        }
    }

    /// Get the global metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a successful request.
    pub fn record_request(&self, provider: &str, model: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed request.
    pub fn record_error(&self, provider: &str, model: &str, error_type: &str) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("error_type", error_type.to_string()),
        ];
        self.errors.add(1, labels);
    }

    /// Record a decoded image.
    pub fn record_image(&self, model: &str) {
        self.images
            .add(1, &[KeyValue::new("model", model.to_string())]);
    }

    /// Record a placeholder written for a platform.
    pub fn record_placeholder(&self, platform: &str) {
        self.placeholders
            .add(1, &[KeyValue::new("platform", platform.to_string())]);
    }
}

impl Default for ModelMetrics {
    fn default() -> Self {
        Self::get().clone()
    }
}
