use log::LevelFilter;
use log4rs::{
    Config,
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

use crate::error::{AppError, AppResult};

/// Maps the number of `-v` flags to a log threshold
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Sends log records at or above the verbosity threshold to stderr
pub fn init_logger(verbose: u8) -> AppResult<()> {
    let stderr_level = level_for_verbosity(verbose);

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} - {m}{n}")))
        .build();

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(stderr_level)))
                .build("stderr", Box::new(stderr)),
        )
        .build(Root::builder().appender("stderr").build(stderr_level))
        .map_err(|err| AppError::Logging(format!("invalid logger config: {}", err)))?;

    log4rs::init_config(config)
        .map_err(|err| AppError::Logging(format!("failed to initialize logger: {}", err)))?;
    Ok(())
}
