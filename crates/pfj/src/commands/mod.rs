pub mod catalog;
pub mod init;
pub mod render;
pub mod tags;
