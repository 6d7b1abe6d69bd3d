mod session_id;
mod turn;

pub use session_id::SessionId;
pub use turn::{Turn, TurnRole};
