pub mod check;
pub mod export;
pub mod inspect;

pub use check::Check;
pub use export::Export;
pub use inspect::Inspect;
