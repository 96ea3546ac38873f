pub mod physics;
pub mod rigid_body;
