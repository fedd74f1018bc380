mod api;
mod stub;

pub use api::Host;
pub use stub::StubHost;
