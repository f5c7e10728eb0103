//! 日志配置模块
//! - 日志级别优先读 RUST_LOG，否则用配置文件里的 log_level
//! - 每个模块用自己的 LOG_TAG 作为 target 输出

use super::setting::Settings;

/// 初始化日志，重复调用不报错
pub fn init_logger() {
    let level = match Settings::get().env.log_level.as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    let mut builder = pretty_env_logger::formatted_timed_builder();
    builder.target(pretty_env_logger::env_logger::Target::Stdout);
    builder.filter_level(level);
    // RUST_LOG 覆盖配置文件
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    if builder.try_init().is_err() {
        log::debug!("logger already initialised, keep the existing one");
    }
}

/// 带 TAG 输出到日志的宏，支持 trace debug info warn error
#[macro_export]
macro_rules! trace {
    ($tag:expr, $($arg:tt)*) => ({
        log::trace!(target: $tag, $($arg)*);
    })
}

#[macro_export]
macro_rules! debug {
    ($tag:expr, $($arg:tt)*) => ({
        log::debug!(target: $tag, $($arg)*);
    })
}

#[macro_export]
macro_rules! info {
    ($tag:expr, $($arg:tt)*) => ({
        log::info!(target: $tag, $($arg)*);
    })
}

#[macro_export]
macro_rules! warn {
    ($tag:expr, $($arg:tt)*) => ({
        log::warn!(target: $tag, $($arg)*);
    })
}

#[macro_export]
macro_rules! error {
    ($tag:expr, $($arg:tt)*) => ({
        log::error!(target: $tag, $($arg)*);
    })
}
