pub mod file;
pub mod format;
pub mod navigation;
pub mod storage;
pub mod time;
