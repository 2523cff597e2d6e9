//! Shared domain types for the adgen creative-generation pipeline.
//!
//! Holds the normalized [`Brief`], the [`CopyVariant`] shape produced by the
//! copy agent, the variant ranker, the generation error taxonomy, the
//! cooperative [`CancelToken`], and env-driven application configuration.

mod app_config;

pub mod brief;
pub mod cancel;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod rank;
pub mod variant;


pub use app_config::{AppConfig, Environment};
pub use brief::{AdFormat, Angle, Brief, RawBriefInput, RiskFlag, Tone};
pub use cancel::CancelToken;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, GenerationError};
pub use rank::{by_total_desc, rank, rank_default, Comparator};
pub use variant::{CopyVariant, HookAngle, VariantScores};
