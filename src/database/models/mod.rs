pub mod bavanakutayima;
pub mod church;
pub mod contribution;
pub mod due;
pub mod house;
pub mod member;
pub mod news;
pub mod transaction;
pub mod types;
pub mod unit;
pub mod user;

pub use bavanakutayima::Bavanakutayima;
pub use church::Church;
pub use contribution::{
    AmountType, Campaign, Contribution, ContributionMode, EventKind, EventRow, EventStatus,
    EventSummary, StothrakazhchaWeek,
};
pub use due::{DueRecord, OutstandingDue};
pub use house::House;
pub use member::Member;
pub use news::News;
pub use transaction::Transaction;
pub use types::{PayerRef, PayerType, PaymentMethod};
pub use unit::Unit;
pub use user::User;
