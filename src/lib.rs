pub mod pid;
pub mod plant;
