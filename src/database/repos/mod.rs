pub mod bavanakutayimas;
pub mod churches;
pub mod dues;
pub mod events;
pub mod houses;
pub mod members;
pub mod news;
pub mod transactions;
pub mod units;
pub mod users;

pub use bavanakutayimas::BavanakutayimaRepo;
pub use churches::ChurchRepo;
pub use dues::DueRepo;
pub use events::EventRepo;
pub use houses::HouseRepo;
pub use members::MemberRepo;
pub use news::NewsRepo;
pub use transactions::TransactionRepo;
pub use units::UnitRepo;
pub use users::UserRepo;
