pub mod metrics;
pub mod providers;
pub mod sections;

pub use metrics::{get_metrics, init_metrics};
pub use providers::{CompletionMode, CompletionProvider, ProviderError};
pub use sections::{extract_case_sections, SectionKey};
