pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{GeminiRewriter, SolapiAuth, SolapiSender};
pub use crate::config::AppConfig;
pub use crate::core::{
    parser::{parse, RawInput},
    reconcile::reconcile,
    render::render,
    rewrite::rewrite_template,
    session::{Preview, Session},
    templates::TemplateCatalog,
};
pub use crate::domain::model::{
    BatchReport, ParseReport, Placeholder, RecipientRecord, RenderedMessage, SendOutcome, Template,
};
pub use crate::utils::error::{Result, SmsError};
