use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to stderr so stdout only carries records
pub fn init_tracing(verbose: bool) -> crate::Result<()> {
    // On Windows, disable ANSI colors to avoid garbage characters in console
    #[cfg(target_os = "windows")]
    let use_ansi = false;

    #[cfg(not(target_os = "windows"))]
    let use_ansi = true;

    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };

    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(level.into())
                    .from_env_lossy(),
            )
            .with_writer(std::io::stderr)
            .with_ansi(use_ansi)
            .with_line_number(true)
            .with_file(true)
            .finish(),
    )?;
    Ok(())
}
