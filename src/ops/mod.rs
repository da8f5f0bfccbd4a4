pub mod card;
pub mod query;
pub mod text_ops;
pub mod transform;
