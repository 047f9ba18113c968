mod action;
mod arm;
mod fault;
mod joint;
mod key;
mod motion;
mod session;
mod terminal;

pub use action::*;
pub use arm::*;
pub use fault::*;
pub use joint::*;
pub use key::*;
pub use motion::*;
pub use session::*;
pub use terminal::*;
