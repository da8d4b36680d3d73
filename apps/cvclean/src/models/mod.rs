pub mod cv;
pub mod template;
