pub mod error;
pub mod memory;
pub mod postgres;
pub mod query;
pub mod record;
pub mod store;

pub use common::{CustomerId, FeedbackId, InteractionId, ProductId};
pub use error::{Result, StoreError};
pub use memory::InMemoryEntityStore;
pub use postgres::PostgresEntityStore;
pub use query::{CustomerQuery, FeedbackQuery};
pub use record::{Customer, Feedback, Interaction, Product};
pub use store::EntityStore;
