pub mod goal;
pub mod identity;
pub mod object_id;
