//! Items Domain
//!
//! Catalog of valuable physical items (watches, bags, jewelry, ...) used by
//! the appraisal application. Persistence sits behind [`ItemRepository`];
//! every business rule lives in [`ItemService`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Validation, partial-update merge, category summary
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Item entity, Category, inputs, summary
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_items::{CreateItemInput, InMemoryItemRepository, ItemService};
//!
//! # async fn example() -> domain_items::ItemResult<()> {
//! let service = ItemService::new(InMemoryItemRepository::new());
//!
//! let item = service
//!     .create_item(CreateItemInput {
//!         name: "Daytona".to_string(),
//!         category: "Watch".to_string(),
//!         brand: "ROLEX".to_string(),
//!         purchase_price: 1_500_000,
//!         purchase_date: "2023-01-15".to_string(),
//!     })
//!     .await?;
//!
//! let summary = service.get_category_summary().await?;
//! assert_eq!(summary.total, 1);
//! # let _ = item;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ItemError, ItemErrorKind, ItemResult};
pub use models::{Category, CategorySummary, CreateItemInput, Item, UpdateItemInput};
pub use repository::{InMemoryItemRepository, ItemRepository};
pub use service::ItemService;
