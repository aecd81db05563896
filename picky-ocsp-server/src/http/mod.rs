pub mod controller;
pub mod http_server;
pub mod middleware;
pub mod utils;
