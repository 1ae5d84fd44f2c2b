mod errors;
pub use errors::*;


mod guard;
pub use guard::SettleOnce;

mod arity;
pub use arity::*;
