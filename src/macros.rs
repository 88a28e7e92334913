/*!
Macro helpers for the index and buffer.

Most of these macros perform checked versions of unsafe operations when the `checked`
cfg is enabled (or in debug test builds), just to try catch any UB early. `internal_error!`
is different: it always panics, because a broken index invariant is a library bug that
must never occur for valid input and the spec requires it to abort the process even in
release builds.
*/

macro_rules! get_unchecked {
    ($slice:expr, $index:expr) => {{
        #[cfg(any(all(test, debug), checked))]
        {
            ($slice)
                .get($index)
                .expect("attempt to index out of bounds")
        }

        #[cfg(not(any(all(test, debug), checked)))]
        {
            // SAFETY: callers must ensure `$index` is within bounds of `$slice`
            #[allow(unused_unsafe)]
            unsafe {
                ($slice).get_unchecked($index)
            }
        }
    }};
}

macro_rules! get_unchecked_mut {
    ($slice:expr, $index:expr) => {{
        #[cfg(any(all(test, debug), checked))]
        {
            ($slice)
                .get_mut($index)
                .expect("attempt to index out of bounds")
        }

        #[cfg(not(any(all(test, debug), checked)))]
        {
            // SAFETY: callers must ensure `$index` is within bounds of `$slice`
            #[allow(unused_unsafe)]
            unsafe {
                ($slice).get_unchecked_mut($index)
            }
        }
    }};
}

macro_rules! from_utf8_unchecked {
    ($bytes:expr) => {{
        #[cfg(any(all(test, debug), checked))]
        {
            std::str::from_utf8($bytes).expect("invalid utf8")
        }

        #[cfg(not(any(all(test, debug), checked)))]
        {
            // SAFETY: callers must ensure `$bytes` is valid UTF8
            #[allow(unused_unsafe)]
            unsafe {
                std::str::from_utf8_unchecked($bytes)
            }
        }
    }};
}

macro_rules! test_assert {
    ($($tokens:tt)*) => {{
        #[cfg(test)]
        {
            debug_assert!($($tokens)*);
        }
    }};
}

macro_rules! test_assert_eq {
    ($($tokens:tt)*) => {{
        #[cfg(test)]
        {
            debug_assert_eq!($($tokens)*);
        }
    }};
}

macro_rules! internal_error {
    ($($tokens:tt)*) => {
        panic!("seekjson: corrupt document index: {}", format!($($tokens)*))
    };
}
