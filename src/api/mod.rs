//! API Module
//!
//! Admin HTTP surface over a running cache: inspection, invalidation,
//! cleanup and snapshots.
//!
//! # Endpoints
//! - `PUT /entries`, `DELETE /entries` - Store an entry, clear the cache
//! - `GET /entries/:key`, `DELETE /entries/:key` - Read or delete one entry
//! - `POST /invalidate`, `POST /invalidate/subject` - Bulk invalidation
//! - `POST /cleanup` - Sweep expired entries
//! - `GET /snapshot`, `POST /snapshot` - Export and import
//! - `GET /stats`, `GET /health`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
