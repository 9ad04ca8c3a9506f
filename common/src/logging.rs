use std::path::Path;

use eyre::{ContextCompat, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the global subscriber.
///
/// `targets` are the crates whose level follows `RUST_LOG` (default `warn`) unless one of the
/// `directives` already names them. When `log_file` is set, a second plain-text layer writes
/// there; keep the returned guard alive until exit so it gets flushed.
pub fn init(
    targets: &[&str],
    directives: &[String],
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>> {
    let log_level = std::env::var("RUST_LOG").unwrap_or("warn".to_owned());
    let (main_target, other_targets) = targets.split_first().context("No log targets")?;
    let mut env_filter = EnvFilter::new(format!("warn,{main_target}={log_level}"));

    for directive in directives {
        env_filter = env_filter.add_directive(directive.parse()?);
    }

    for target in other_targets {
        if !directives.iter().any(|x| x.starts_with(target)) {
            env_filter = env_filter.add_directive(format!("{target}={log_level}").parse()?);
        }
    }

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path.file_name().context("Log file has no file name")?;
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (
                Some(layer().with_writer(non_blocking).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_writer(std::io::stderr)
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .compact(),
        )
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
