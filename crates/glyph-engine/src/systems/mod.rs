// systems/mod.rs
//
// Systems operate on characters but own no state of their own.

pub mod dispatch;
