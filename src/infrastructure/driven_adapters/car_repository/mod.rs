//! Car Repository Implementations

mod mongo;

pub use mongo::MongoCarRepository;
