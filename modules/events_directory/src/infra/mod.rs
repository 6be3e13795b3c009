pub mod publisher;
pub mod storage;
