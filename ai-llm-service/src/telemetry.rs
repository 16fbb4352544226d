use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::{Level, Metadata};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::layer::Filter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Crate target prefix used to filter only library-originated logs.
pub const TARGET_PREFIX: &str = "ai_llm_service";

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

fn is_library_target(meta: &Metadata<'_>) -> bool {
    meta.target().starts_with(TARGET_PREFIX)
}

/// Build a **library-scoped** formatting layer that renders ONLY events emitted by this crate.
///
/// - RFC3339 UTC timestamps
/// - Compact single-line format with `file:line` and target
/// - ANSI colors only when stdout is a terminal
///
/// Upstream latency and status fields live here, so keeping source locations
/// makes failed completions easy to trace back.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stdout().is_terminal();

    fmt::layer()
        .with_timer(ChronoRfc3339Utc)
        .with_level(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(use_ansi)
        .event_format(fmt::format().compact().with_source_location(true))
        .with_filter(filter::filter_fn(is_library_target))
}

/// Per-layer filter for the application's general fmt layer, so events from
/// this crate are not printed twice when composed with [`layer`].
pub fn not_library<S>() -> impl Filter<S> + Send + Sync
where
    S: tracing::Subscriber,
{
    filter::filter_fn(|meta| !is_library_target(meta))
}

/// Helper to build a level directive for **this** library only.
/// Example:
/// `EnvFilter::new("info").add_directive(level_directive(Level::DEBUG))`
pub fn level_directive(level: Level) -> Directive {
    let s = format!("{TARGET_PREFIX}={}", level.as_str().to_lowercase());
    // Built from a constant crate name and a valid level; parsing cannot fail.
    Directive::from_str(&s).unwrap_or_else(|_| LevelFilter::INFO.into())
}

/// Creates an `EnvFilter` from `RUST_LOG`, or from `default` plus a
/// per-crate `level` directive for this library when `RUST_LOG` is unset
/// or unparsable.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    env_filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), default, level)
}

/// [`env_filter_with_level`] over an explicit `RUST_LOG` value.
///
/// A set value is used as-is, so its directives for this crate are never
/// overridden by `level`.
pub fn env_filter_from(rust_log: Option<&str>, default: &str, level: Level) -> EnvFilter {
    rust_log
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(default).add_directive(level_directive(level)))
}
