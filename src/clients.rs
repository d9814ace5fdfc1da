pub mod grading;
pub mod transport;

pub use grading::GradingClient;
pub use transport::{HttpTransport, RemoteResponse, Transport};
