pub mod emit;
pub mod golf;
pub mod ir_loader;
pub mod lang_resolver;
pub mod langs;
pub mod output;
