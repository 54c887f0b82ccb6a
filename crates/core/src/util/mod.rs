/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took to evaluate, then evaluates to the value
/// of the expression. The log level defaults to debug.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_timed_passes_value_through() {
        let value = crate::timed!("addition", 2 + 2);
        assert_eq!(value, 4);
        let value = crate::timed!("string", log::Level::Trace, "hello");
        assert_eq!(value, "hello");
    }
}
