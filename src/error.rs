//! Error type for page setup. Interaction itself never fails; only building the
//! page (finding the window, creating nodes) and parsing config can.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no window")]
    NoWindow,

    #[error("no document")]
    NoDocument,

    #[error("document has no body")]
    NoBody,

    /// 2D context could not be obtained from the stage canvas
    #[error("canvas unavailable: {0}")]
    Canvas(String),

    /// Any exception thrown by a DOM call
    #[error("DOM error: {0}")]
    Dom(String),

    #[error("invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        Error::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        assert_eq!(Error::NoWindow.to_string(), "no window");
        assert_eq!(Error::Config("bad".into()).to_string(), "invalid config: bad");
    }
}
