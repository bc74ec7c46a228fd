//! Terminal output: log sink, banners, interactive prompts

pub mod format;
pub mod logger;
pub mod prompt;
