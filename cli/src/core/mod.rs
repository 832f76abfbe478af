pub mod forms;
pub mod registry;
pub mod resources;
