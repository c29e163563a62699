pub mod parser;
pub mod reconcile;
pub mod render;
pub mod rewrite;
pub mod session;
pub mod templates;

pub use crate::domain::model::{
    BatchReport, ParseReport, Placeholder, RecipientRecord, RenderedMessage, RowError,
    SendOutcome, Template,
};
pub use crate::domain::ports::{MessageSender, TemplateRewriter};
pub use crate::utils::error::Result;
