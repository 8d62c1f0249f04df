mod offset;
pub use offset::OffsetConfig;
