pub mod form;
pub mod api;
pub mod docs;

pub use form::*;
pub use api::*;
pub use docs::*;
