pub mod contributions;
pub mod dues;

pub use contributions::contribute;
pub use dues::{list_outstanding, pay_due, process_dues, ProcessReport};
