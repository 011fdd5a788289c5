mod calendar;
mod civil;
mod zoned;

/// A simple logger that prints everything to stderr.
///
/// The test harness captures stderr, so log messages only show up for
/// failing tests (or with `--nocapture`). Calling `init` more than once is
/// fine. Every call after the first returns an error that can be ignored.
#[derive(Debug)]
struct Logger(());

const LOGGER: &'static Logger = &Logger(());

impl Logger {
    fn init() -> std::result::Result<(), log::SetLoggerError> {
        log::set_logger(LOGGER)?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }
}

impl log::Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        match (record.file(), record.line()) {
            (Some(file), Some(line)) => {
                eprintln!(
                    "{}|{}|{}:{}: {}",
                    record.level(),
                    record.target(),
                    file,
                    line,
                    record.args()
                );
            }
            (Some(file), None) => {
                eprintln!(
                    "{}|{}|{}: {}",
                    record.level(),
                    record.target(),
                    file,
                    record.args()
                );
            }
            _ => {
                eprintln!(
                    "{}|{}: {}",
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {}
}

/// A type alias we use for tests that want to use `?`.
type Result = std::result::Result<(), calends::Error>;
