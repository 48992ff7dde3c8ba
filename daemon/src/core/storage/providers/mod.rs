mod kyc;
mod table;

pub use self::{kyc::*, table::*};
