#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod assign;
pub mod command;
pub mod error;
pub mod message;
pub mod platform;
pub mod role;
pub mod rules;
pub mod session;
pub mod test_util;
