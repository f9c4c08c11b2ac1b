pub mod calculation;
pub mod user;

pub use calculation::SqliteCalculationRepository;
pub use user::SqliteUserRepository;
