//! The response envelope wrapped around every API payload.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::api::Error;

/// The `code` of a successful response.
pub const OK_CODE: u16 = 200;

/// The `status` of a successful response.
pub const OK_STATUS: &str = "OK.";

#[derive(Deserialize)]
struct Envelope {
  code: u16,
  status: String,
  #[serde(default)]
  message: Option<String>,
  #[serde(default)]
  data: Option<serde_json::Value>,
}

/// Unwraps the `data` of a response body.
///
/// The body's own `code` and `status` decide whether the request succeeded;
/// the HTTP status line is not consulted. `data` is only decoded as a `T`
/// once the envelope reports success, so a failing response is reported as
/// [`Error::Status`] rather than as a decoding error.
pub fn unwrap<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
  let envelope: Envelope = serde_json::from_slice(body)?;
  if envelope.code != OK_CODE || envelope.status != OK_STATUS {
    return Err(Error::Status {
      code: envelope.code,
      status: envelope.status,
      message: envelope.message,
    });
  }

  match envelope.data {
    Some(data) => Ok(serde_json::from_value(data)?),
    None => Err(Error::Malformed("response has no `data`".to_string())),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn success() {
    let data: Vec<u32> =
      unwrap(br#"{"code":200,"status":"OK.","message":"ok","data":[1,2]}"#)
        .unwrap();
    assert_eq!(data, vec![1, 2]);
  }

  #[test]
  fn failing_code() {
    let err = unwrap::<Vec<u32>>(
      br#"{"code":404,"status":"Not Found.","message":"Surah \"115\" is not found.","data":{}}"#,
    )
    .unwrap_err();

    match err {
      Error::Status {
        code,
        status,
        message,
      } => {
        assert_eq!(code, 404);
        assert_eq!(status, "Not Found.");
        assert_eq!(message.as_deref(), Some("Surah \"115\" is not found."));
      }
      e => panic!("unexpected error: {}", e),
    }
  }

  #[test]
  fn ok_code_with_wrong_status() {
    let err =
      unwrap::<Vec<u32>>(br#"{"code":200,"status":"Maybe.","data":[]}"#)
        .unwrap_err();
    assert!(matches!(err, Error::Status { code: 200, .. }));
  }

  #[test]
  fn missing_data() {
    let err = unwrap::<Vec<u32>>(br#"{"code":200,"status":"OK."}"#)
      .unwrap_err();
    assert!(matches!(err, Error::Malformed(_)));
  }

  #[test]
  fn not_json() {
    let err = unwrap::<Vec<u32>>(b"<html>502 Bad Gateway</html>").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
  }

  #[test]
  fn wrong_data_shape() {
    let err =
      unwrap::<Vec<u32>>(br#"{"code":200,"status":"OK.","data":{"a":1}}"#)
        .unwrap_err();
    assert!(matches!(err, Error::Json(_)));
  }
}
