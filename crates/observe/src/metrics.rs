use {
    prometheus::Encoder,
    std::{collections::HashMap, sync::OnceLock},
};

/// Global metrics registry used by all components.
static REGISTRY: OnceLock<prometheus_metric_storage::StorageRegistry> = OnceLock::new();

/// Configure the global metrics registry with an optional common prefix and
/// common labels.
///
/// Must be called at most once and before any call to
/// [`get_storage_registry`], ideally at the very beginning of `main`.
///
/// # Panics
///
/// Panics if called twice or after the registry was already read.
pub fn setup_registry(prefix: Option<String>, labels: Option<HashMap<String, String>>) {
    let registry = prometheus::Registry::new_custom(prefix, labels).unwrap();
    let storage_registry = prometheus_metric_storage::StorageRegistry::new(registry);
    REGISTRY.set(storage_registry).unwrap();
}

/// Like [`setup_registry`], but can be called multiple times in a row. Later
/// calls are ignored.
///
/// Useful for tests.
pub fn setup_registry_reentrant(prefix: Option<String>, labels: Option<HashMap<String, String>>) {
    let registry = prometheus::Registry::new_custom(prefix, labels).unwrap();
    let storage_registry = prometheus_metric_storage::StorageRegistry::new(registry);
    REGISTRY.set(storage_registry).ok();
}

/// Get the global instance of the metrics registry.
pub fn get_registry() -> &'static prometheus::Registry {
    get_storage_registry().registry()
}

/// Get the global instance of the metric storage registry.
///
/// Falls back to a default registry when [`setup_registry`] was never called
/// so that unit tests do not have to perform any setup.
pub fn get_storage_registry() -> &'static prometheus_metric_storage::StorageRegistry {
    REGISTRY.get_or_init(prometheus_metric_storage::StorageRegistry::default)
}

/// Encode the registry's current contents in the prometheus text format.
/// The embedding shell serves this wherever it exposes metrics.
pub fn encode(registry: &prometheus::Registry) -> String {
    let encoder = prometheus::TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&registry.gather(), &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(prometheus_metric_storage::MetricStorage)]
    #[metric(subsystem = "observe_test")]
    struct Metrics {
        /// Arbitrary counter.
        count: prometheus::IntCounter,
    }

    #[test]
    fn storage_registry_works_without_setup() {
        let metrics = Metrics::instance(get_storage_registry()).unwrap();
        metrics.count.inc();
        let encoded = encode(get_registry());
        assert!(encoded.contains("observe_test_count"));
    }
}
