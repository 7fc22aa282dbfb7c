pub mod result;
pub mod skill;
