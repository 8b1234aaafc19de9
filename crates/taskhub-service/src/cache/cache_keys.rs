//! Fixed cache keys.
//!
//! Only full listings are cached, so each entity has exactly one key.

/// Key holding the serialized list of every user.
pub const USERS_FIND_ALL: &str = "taskhub:users:find-all";

/// Key holding the serialized list of every todo.
pub const TODOS_FIND_ALL: &str = "taskhub:todos:find-all";
