//! Log setup: a rotating file plus stdout, both as
//! `timestamp,LEVEL,message,target` lines.

use anyhow::Context as _;
use hwbot_core::config::{LogConfig, LogRotation};
use std::fmt;
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Comma-delimited event format.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommaFormat;

impl<S, N> FormatEvent<S, N> for CommaFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{},{},",
            chrono::Local::now().format(TIMESTAMP_FORMAT),
            meta.level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer, ",{}", meta.target())
    }
}

fn rotation(r: LogRotation) -> Rotation {
    match r {
        LogRotation::Minutely => Rotation::MINUTELY,
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
        LogRotation::Never => Rotation::NEVER,
    }
}

/// Build the rolling file appender described by `cfg`.
pub fn file_appender(cfg: &LogConfig) -> anyhow::Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(rotation(cfg.rotation))
        .filename_prefix(cfg.file_prefix.as_str())
        .filename_suffix("log")
        .max_log_files(cfg.max_files.max(1))
        .build(&cfg.dir)
        .with_context(|| format!("failed to open log directory {}", cfg.dir))
}

/// Install the global subscriber. Keep the returned guard alive until exit,
/// or buffered file output is lost.
pub fn init(cfg: &LogConfig) -> anyhow::Result<WorkerGuard> {
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender(cfg)?);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(CommaFormat)
                .with_writer(std::io::stdout),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(CommaFormat)
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(guard)
}
