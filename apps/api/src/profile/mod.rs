// The user progress aggregate: models, mutation API, durable snapshots.
// Every mutation goes through `store::ProfileStore` — handlers never touch
// `UserProfile` fields directly.

pub mod handlers;
pub mod models;
pub mod storage;
pub mod store;
