use crate::domain::errors::AppError;

/// Source of the raw price history document.
///
/// Implementations only fetch; validation happens in the domain so every
/// source is held to the same rules.
#[allow(async_fn_in_trait)]
pub trait PriceHistoryRepository {
    /// Fetch the document body as text.
    async fn fetch_document(&self) -> Result<String, AppError>;

    /// Human-readable origin for logs and error messages.
    fn describe(&self) -> String;
}

/// Repository serving a document that is already in memory.
#[derive(Debug, Clone)]
pub struct InMemoryPriceHistory {
    body: String,
}

impl InMemoryPriceHistory {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl PriceHistoryRepository for InMemoryPriceHistory {
    async fn fetch_document(&self) -> Result<String, AppError> {
        Ok(self.body.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory document ({} bytes)", self.body.len())
    }
}
