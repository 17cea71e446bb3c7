pub mod canonicalize;
pub mod conditions;
pub mod delegate;
pub mod event_id;
pub mod sign;
pub mod verify;
