/// Unwraps the `Err` variant, panicking with the `Ok` value and an optional
/// formatted message otherwise.
#[macro_export]
macro_rules! assert_err {
    ($e:expr $(, $($t:tt)* )?) => {
        match $e {
            Err(e) => e,
            actual => {
                use std::fmt::Write;
                let mut msg = format!("expected `Err`; actual={:?}", actual);

                $(
                    write!(msg, ", ").unwrap();
                    write!(msg, $($t)*).unwrap();
                )?

                panic!("{}", msg);
            }
        }
    };
}

#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(err) => panic!("expected `Ok`; actual=Err({:?})", err),
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn unwraps_ok_and_err() {
        let ok: Result<u8, String> = Ok(1);
        assert_eq!(assert_ok!(ok), 1);

        let err: Result<u8, String> = Err("no such table".to_string());
        assert_eq!(assert_err!(err, "lookup {}", "book"), "no such table");
    }

    #[test]
    #[should_panic(expected = "expected `Err`; actual=Ok(1), table=book")]
    fn err_message_includes_context() {
        let ok: Result<u8, String> = Ok(1);
        assert_err!(ok, "table={}", "book");
    }
}
