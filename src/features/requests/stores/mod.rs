mod request_store;

pub use request_store::{PgRequestStore, RequestStore};
