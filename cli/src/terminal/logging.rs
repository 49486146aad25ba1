use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

pub struct FindrFormatter;

fn level_tag(level: Level) -> ColoredString {
    match level {
        Level::TRACE => "[.]".dimmed(),
        Level::DEBUG => "[?]".cyan(),
        Level::INFO => "[>]".green().bold(),
        Level::WARN => "[!]".yellow().bold(),
        Level::ERROR => "[x]".red().bold(),
    }
}

impl<S, N> FormatEvent<S, N> for FindrFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let level = *meta.level();

        write!(writer, "{} ", level_tag(level))?;

        // Verbose levels carry their origin; the user-facing ones stay bare.
        if level >= Level::DEBUG {
            write!(writer, "{} ", meta.target().dimmed())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Installs the global subscriber.
///
/// Log lines go to stderr so stdout stays reserved for discovery records;
/// `RUST_LOG` overrides the default `info` filter.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(FindrFormatter)
        .with_writer(std::io::stderr)
        .init();
}
