//! TLS settings applied to probe connections
//!
//! The mode maps onto each driver's own SSL mode:
//!
//! | mode | `PostgreSQL` | `MySQL` |
//! |---|---|---|
//! | disable | disable | DISABLED |
//! | require | require | REQUIRED |
//! | verify-ca | verify-ca | `VERIFY_CA` |
//! | verify-full | verify-full | `VERIFY_IDENTITY` |

pub mod config;

pub use config::{TlsConfig, TlsMode};
