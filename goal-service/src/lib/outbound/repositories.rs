pub mod goal;
pub mod identity;
pub mod memory;

pub use goal::PostgresGoalRepository;
pub use identity::PostgresIdentityRepository;
pub use memory::InMemoryGoalRepository;
pub use memory::InMemoryIdentityRepository;
