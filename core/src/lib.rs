pub mod alert;
pub mod decision;
pub mod monitor;
pub mod probe;
pub mod shutdown;
