mod dispatch;
mod infos;
mod manual_control;
mod menu;
mod registry;
#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::*;
pub use infos::*;
pub use manual_control::*;
pub use menu::*;
pub use registry::*;
