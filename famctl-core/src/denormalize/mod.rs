//! Join-row denormalization
//!
//! Both builders are single-pass state machines over rows already sorted by the
//! query's `ORDER BY`:
//!
//! ```text
//! NoGroup -> GroupOpen -> GroupOpen (same key, accumulate)
//!         -> GroupOpen (new key, flush + open) -> ... -> Flushed (finish)
//! ```
//!
//! They never re-sort and never fail. Rows that break the sort precondition
//! produce a split group rather than an error.

pub mod detail;
pub mod list;

pub use detail::FamilyDetailBuilder;
pub use list::FamilyListBuilder;
