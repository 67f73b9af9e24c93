pub mod classify;
pub mod fields;
pub mod normalize;
pub mod reader;

pub use fields::RawRow;
pub use normalize::RowNormalizer;
