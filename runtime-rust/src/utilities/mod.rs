pub mod log_space;
pub mod special;
