/// Feature-gated diagnostics
///
/// `esp32-log` prints through `esp-println`, `log` forwards to the `log`
/// facade at the given level. Without either feature the arguments are only
/// type-checked.
macro_rules! diag {
    ($level:ident, $($arg:tt)*) => {{
        #[cfg(feature = "esp32-log")]
        esp_println::println!($($arg)*);
        #[cfg(feature = "log")]
        log::$level!($($arg)*);
        #[cfg(not(any(feature = "esp32-log", feature = "log")))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

pub(crate) use diag;
