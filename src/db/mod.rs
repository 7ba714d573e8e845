pub mod db;
pub mod jobdb;
pub mod notificationdb;
pub mod paymentdb;
pub mod proposaldb;
pub mod reviewdb;
pub mod userdb;
