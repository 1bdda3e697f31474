mod client;
mod types;

pub use client::ConversionClient;
pub use types::SelectedFile;

use crate::error::Result;
use async_trait::async_trait;

/// Something that can turn a local file into a converted file on the
/// server and return the server-relative path of the result.
#[async_trait]
pub trait ConversionBackend: Send + Sync {
    async fn submit(&self, file: &SelectedFile, output_format: &str) -> Result<String>;
}
