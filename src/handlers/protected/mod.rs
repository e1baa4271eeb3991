// handlers/protected/mod.rs - Protected handlers (signed-in user required)
//
// Every handler here starts with `require_user`; without a user in the session
// nothing is touched and the caller is sent to the login page.

pub mod tickets;
