mod health;
mod servers;

pub use health::health_handler;
pub use servers::{
    describe_handler, fetch_handler, search_handler, submit_handler, trending_handler,
};
