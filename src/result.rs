//! Result type used throughout releasekeeper.
//!
//! Everything that can fail returns [`Result`], an alias for
//! `color_eyre::eyre::Result<T>`. Typed failures from [`crate::error`] are
//! converted into reports with `?` and can be recovered with
//! `Report::downcast_ref` where a caller needs to branch on them.
//!
//! ```rust,ignore
//! use color_eyre::eyre::WrapErr;
//! use crate::result::Result;
//!
//! fn load_manifest(content: &str) -> Result<serde_json::Value> {
//!     let doc = serde_json::from_str(content)
//!         .wrap_err("failed to parse package.json")?;
//!     Ok(doc)
//! }
//! ```

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used throughout releasekeeper.
pub type Result<T> = EyreResult<T>;
