//! Typed records and the dynamic values the grid sorts on

mod location;
mod organization;
mod row;
mod user;
mod value;

pub use location::*;
pub use organization::*;
pub use row::*;
pub use user::*;
pub use value::*;
