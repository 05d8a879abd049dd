//! Filesystem helpers shared by the analysis core

pub mod module_resolver;

pub use module_resolver::{is_project_module, ModuleResolver, Resolution};
