mod offset;
pub use offset::OffsetStrategy;
