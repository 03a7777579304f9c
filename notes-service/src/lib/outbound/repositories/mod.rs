pub mod note;
pub mod revocation;
pub mod user;

pub use note::PostgresNoteRepository;
pub use revocation::PostgresRevocationStore;
pub use user::PostgresUserRepository;
