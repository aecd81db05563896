mod authority;
mod config;
mod http;
mod logging;
mod store;
mod utils;

use crate::authority::OcspAuthority;
use crate::config::Config;
use crate::http::http_server::{shutdown_signal, HttpServer};

#[tokio::main]
async fn main() {
    let conf = match Config::startup_init() {
        Ok(conf) => conf,
        Err(e) => {
            eprintln!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let _log_handle = match logging::init_logs(&conf) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let authority = match OcspAuthority::from_config(&conf) {
        Ok(authority) => {
            log::info!("answering OCSP requests for {}", authority.issuer().subject());
            authority
        }
        Err(e) => {
            log::error!("couldn't build OCSP authority: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("building http server ...");
    let http_server = match HttpServer::bind(conf.listen_address, authority).await {
        Ok(http_server) => http_server,
        Err(e) => {
            log::error!("couldn't listen on {}: {}", conf.listen_address, e);
            std::process::exit(1);
        }
    };

    match http_server.local_addr() {
        Ok(address) => log::info!("starting http server on {} ...", address),
        Err(_) => log::info!("starting http server ..."),
    }
    if let Err(e) = http_server.run(shutdown_signal()).await {
        log::error!("{}", e);
    }

    log::info!("http server stopped");
}
