pub mod memory;
pub mod path;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use path::{collection_path, split_document_path, PathError};
pub use postgres::PgDocumentStore;
pub use store::{Document, DocumentStore, Fields, StoreError, WriteBatch, WriteOp};
