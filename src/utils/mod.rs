pub mod budget;
pub mod password;
pub mod token;
