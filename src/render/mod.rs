//! HTML rendering for the entry form and the record table.

pub mod page;

pub use page::render_page;
