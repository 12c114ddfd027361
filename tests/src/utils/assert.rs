use std::fmt::{Debug, Display};

pub fn assert_client_err<T: Debug, E: Display>(res: Result<T, E>, msg: &str) {
    let err = res.unwrap_err().to_string();
    assert!(err.contains(msg), "expected error containing {msg:?}, got {err}");
}
