//! Tradepost shared infrastructure
//!
//! Cross-cutting concerns used by every Tradepost binary. Currently this is
//! just structured logging setup; domain types live in `tp-platform`.

pub mod logging;
