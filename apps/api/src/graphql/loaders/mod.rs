//! DataLoader implementations for GraphQL
//!
//! This module provides DataLoader implementations to solve N+1 query
//! problems in GraphQL relationship resolvers; the author loader batches
//! the `Post.author` lookups of a whole page into one query.

mod author;

pub use author::AuthorLoader;
