mod request;

pub use request::{NewRequest, Request, RequestStatus};
