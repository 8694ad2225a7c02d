use tracing_subscriber::EnvFilter;

/// `-v` selects `info`, `-vv` and beyond `debug`. Without flags `RUST_LOG`
/// applies, falling back to `warn`.
fn filter_for(verbosity: u8) -> EnvFilter {
  match verbosity {
    0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    1 => EnvFilter::new("info"),
    _ => EnvFilter::new("debug"),
  }
}

/// Installs the stderr subscriber so stdout carries only display output.
pub fn init_logging(verbosity: u8) {
  // A second call (e.g. from tests) keeps the first subscriber.
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter_for(verbosity))
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

#[cfg(test)]
mod tests {
  use super::*;
  use tracing_subscriber::filter::LevelFilter;

  #[test]
  fn test_verbose_flags_select_level() {
    assert_eq!(filter_for(1).max_level_hint(), Some(LevelFilter::INFO));
    assert_eq!(filter_for(2).max_level_hint(), Some(LevelFilter::DEBUG));
    assert_eq!(filter_for(5).max_level_hint(), Some(LevelFilter::DEBUG));
  }
}
