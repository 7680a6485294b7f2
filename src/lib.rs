#[macro_use]
extern crate bitflags;

mod error;
pub use error::Error;

pub mod arch_info;

mod pod;
pub use pod::*;

mod lift;
pub use lift::*;

mod instr_builder;
pub use instr_builder::*;

mod dump;
pub use dump::*;

mod ssa;
pub use ssa::*;

pub type Result<T> = std::result::Result<T, error::Error>;
