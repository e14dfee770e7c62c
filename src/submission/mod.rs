pub mod pipeline;
pub mod timestamp;
pub mod validate;
