pub mod view_poller;

pub use view_poller::{ViewRegistry, ViewSession};
