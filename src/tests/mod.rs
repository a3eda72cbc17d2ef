#[macro_use]
mod util;

mod differentiation;
