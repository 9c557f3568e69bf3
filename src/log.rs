use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{Registry, EnvFilter};
use tracing_subscriber::layer::SubscriberExt;

use std::path::Path;

use thiserror::Error;
use anyhow::Result;
use crate::log::LogError::{InitLogTracerError, SetGlobalDefaultError};

pub const LOG_FILE: &str = "gl_viewer.log";

/// Installs a Bunyan JSON subscriber writing to a daily file under
/// `directory`. Keep the returned guard alive for the whole program, the
/// writer stops flushing once it drops.
pub fn init_logger(directory: impl AsRef<Path>) -> Result<WorkerGuard> {
    LogTracer::init().map_err(|e| {
        InitLogTracerError {
            source: e
        }
    })?;

    let app_name = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION")).to_string();
    let file_appender = tracing_appender::rolling::daily(directory, LOG_FILE);
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
    let bunyan_formatting_layer = BunyanFormattingLayer::new(app_name, non_blocking_writer);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("INFO"));
    let subscriber = Registry::default()
        .with(filter)
        .with(JsonStorageLayer)
        .with(bunyan_formatting_layer);
    tracing::subscriber::set_global_default(subscriber).map_err(|e| {
        SetGlobalDefaultError {
            source: e
        }
    })?;

    Ok(guard)
}

#[derive(Error, Debug)]
pub enum LogError {
    #[error("Error initializing log-forwarder for tracing")]
    InitLogTracerError {
        source: tracing_log::log_tracer::SetLoggerError
    },
    #[error("Error setting global default subscriber for tracing")]
    SetGlobalDefaultError {
        source: tracing::subscriber::SetGlobalDefaultError
    }
}
