pub mod observability;
pub use observability::ObservabilityConfig;

