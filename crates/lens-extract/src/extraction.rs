//! Extraction adapter registry for dispatching uploads by strategy.

use std::collections::HashMap;
use std::sync::Arc;

use lens_core::{Error, ExtractionAdapter, ExtractionResult, ExtractionStrategy, Result};

use crate::adapters::{PdfTextAdapter, TextNativeAdapter};

/// Registry mapping extraction strategies to their adapter implementations.
pub struct ExtractionRegistry {
    adapters: HashMap<ExtractionStrategy, Arc<dyn ExtractionAdapter>>,
}

impl ExtractionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// Registry with the plain-text and PDF adapters installed.
    pub fn with_default_adapters() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TextNativeAdapter));
        registry.register(Arc::new(PdfTextAdapter));
        registry
    }

    /// Register an adapter. Replaces any existing adapter for the same strategy.
    pub fn register(&mut self, adapter: Arc<dyn ExtractionAdapter>) {
        self.adapters.insert(adapter.strategy(), adapter);
    }

    /// Extract content using the adapter registered for the given strategy.
    pub async fn extract(
        &self,
        strategy: ExtractionStrategy,
        data: &[u8],
        filename: &str,
    ) -> Result<ExtractionResult> {
        let adapter = self.adapters.get(&strategy).ok_or_else(|| {
            Error::Internal(format!(
                "No extraction adapter registered for strategy: {:?}",
                strategy
            ))
        })?;
        adapter.extract(data, filename).await
    }

    /// List all strategies that have registered adapters.
    pub fn available_strategies(&self) -> Vec<ExtractionStrategy> {
        self.adapters.keys().copied().collect()
    }

    /// Check if an adapter is registered for the given strategy.
    pub fn has_adapter(&self, strategy: ExtractionStrategy) -> bool {
        self.adapters.contains_key(&strategy)
    }
}

impl Default for ExtractionRegistry {
    fn default() -> Self {
        Self::with_default_adapters()
    }
}
