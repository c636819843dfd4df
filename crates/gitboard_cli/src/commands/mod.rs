pub mod export;
pub mod meta;
