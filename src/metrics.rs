use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Registry, opts,
    register_histogram_vec_with_registry, register_int_counter_vec_with_registry,
    register_int_counter_with_registry,
};
use std::sync::LazyLock;

pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

trait ResultExt<T> {
    fn or_exit(self, context: &str) -> T;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn or_exit(self, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                eprintln!("failed to initialize metric ({context}): {err}");
                std::process::exit(1);
            }
        }
    }
}

pub static INVOCATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec_with_registry!(
        opts!(
            "vpndeck_invocations_total",
            "Total client invocations by action and outcome"
        ),
        &["action", "outcome"],
        &REGISTRY
    )
    .or_exit("metric can be created")
});

pub static INVOCATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec_with_registry!(
        HistogramOpts::new(
            "vpndeck_invocation_duration_seconds",
            "Duration of client invocations"
        ),
        &["action"],
        &REGISTRY
    )
    .or_exit("metric can be created")
});

pub static STATUS_MALFORMED_LINES: LazyLock<IntCounter> = LazyLock::new(|| {
    register_int_counter_with_registry!(
        opts!(
            "vpndeck_status_malformed_lines_total",
            "Status lines skipped because they carried no key/value separator"
        ),
        &REGISTRY
    )
    .or_exit("metric can be created")
});

/// Encode all registered metrics in the Prometheus text format
///
/// # Errors
///
/// Returns an error if encoding fails
pub fn encode_metrics() -> Result<Vec<u8>, String> {
    let mut buffer = Vec::new();
    let encoder = prometheus::TextEncoder::new();

    encoder
        .encode(&REGISTRY.gather(), &mut buffer)
        .map_err(|e| format!("could not encode custom metrics: {e}"))?;

    Ok(buffer)
}
