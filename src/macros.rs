/// Writes one record to an [`EventLog`](crate::logging::EventLog), using the
/// calling module path as the target.
/// Usage:
/// ```rust,ignore
/// store_log!(self.log, Level::Info, "Inserted {} mock records", n);
/// ```
/// With the file sink this ends up as:
/// [2025-04-25T16:32:10+02:00][INFO ][netlat::store][pid=4568] Inserted 20 mock records
#[macro_export]
macro_rules! store_log {
    ($log:expr, $level:expr, $($arg:tt)+) => {
        $log.record($level, module_path!(), format_args!($($arg)+))
    };
}
