//! Output side of dialogforge: the abstract node tree ([`target::Target`]),
//! schema-valid naming ([`naming`]), and `.content.xml` serialization
//! ([`xml`]).

pub mod naming;
pub mod target;
pub mod xml;

pub use naming::{NamingMode, unique_name, valid_name};
pub use target::Target;
