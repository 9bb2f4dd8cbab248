//! MongoDB persistence implementation

mod article_repo;
mod connection;
mod group_repo;
mod unit_of_work;
mod user_repo;

pub use article_repo::MongoArticleRepository;
pub use connection::{init_mongodb, MongoConnection};
pub use group_repo::MongoGroupRepository;
pub use unit_of_work::MongoUnitOfWork;
pub use user_repo::MongoUserRepository;

use mongodb::options::ReplaceOptions;

fn upsert() -> ReplaceOptions {
    ReplaceOptions::builder().upsert(true).build()
}
