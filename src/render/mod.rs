pub mod markup;
pub mod sanitize;
