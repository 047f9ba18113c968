mod ansi;
mod charset;
mod line;

pub use ansi::*;
pub use charset::*;
pub use line::*;
