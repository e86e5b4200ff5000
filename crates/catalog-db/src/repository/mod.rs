//! # Repository Module
//!
//! Database repository implementations for the products catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  ProductsService (products-service)                                    │
//! │       │                                                                 │
//! │       │  store.find_by_id(7)                                           │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── insert(&self, new_product)                                        │
//! │  ├── find_by_id(&self, id)                                             │
//! │  ├── find_many_available(&self, skip, take)                            │
//! │  ├── count_available(&self)                                            │
//! │  ├── find_many_by_ids(&self, ids)                                      │
//! │  └── update_fields(&self, id, changes)                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod product;
