pub use self::metrics::MetricsTable;

mod metrics;
