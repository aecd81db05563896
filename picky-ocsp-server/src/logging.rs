use crate::config::Config as ServerConfig;
use log::{LevelFilter, SetLoggerError};
use log4rs::config::runtime::ConfigErrors;
use log4rs::config::Config as LoggerConfig;
use log4rs::Handle;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("unable to configure logger: {0}")]
    Config(#[from] ConfigErrors),
    #[error("can't init log4rs: {0}")]
    Init(#[from] SetLoggerError),
}

pub fn init_logs(config: &ServerConfig) -> Result<Handle, LoggingError> {
    let config = build_logger_config(config)?;
    Ok(log4rs::init_config(config)?)
}

pub fn build_logger_config(config: &ServerConfig) -> Result<LoggerConfig, ConfigErrors> {
    use log4rs::append::console::ConsoleAppender;
    use log4rs::config::{Appender, Logger, Root};

    LoggerConfig::builder()
        .appender(Appender::builder().build("stdout", Box::new(ConsoleAppender::builder().build())))
        .logger(Logger::builder().build("mio", LevelFilter::Off))
        .logger(Logger::builder().build("hyper", LevelFilter::Off))
        .logger(Logger::builder().build("hyper_util", LevelFilter::Off))
        .logger(Logger::builder().build("tokio", LevelFilter::Off))
        .logger(Logger::builder().build("tower", LevelFilter::Warn))
        .logger(Logger::builder().build("axum", LevelFilter::Warn))
        .build(Root::builder().appender("stdout").build(config.log_level))
}
