// handlers/public/mod.rs - Public handlers (no signed-in user required)
//
// Page rendering (which applies its own gate to protected pages) and the
// login/signup/logout actions.

pub mod auth;
pub mod pages;
