mod server;
pub use server::Server;

mod proxy;
pub use proxy::{proxy, read_body};

mod response;
pub use response::{error_reply, relay, ErrorResponse};
