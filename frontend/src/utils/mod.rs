pub mod date;
pub mod navigation;
pub mod storage;
