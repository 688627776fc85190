pub mod build;
pub mod clear;
pub mod init;
pub mod write_translations;
