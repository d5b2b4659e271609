use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::Error;

/// Header both services read the operator's key from.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Build the `X-API-Key` header value for a request.
///
/// The value is marked sensitive so it never shows up in reqwest's
/// `Debug` output or in traces.
pub(crate) fn api_key_value(api_key: &SecretString) -> Result<HeaderValue, Error> {
    let mut value =
        HeaderValue::from_str(api_key.expose_secret()).map_err(|_| Error::MalformedApiKey)?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn header_value_is_sensitive() {
        let key = SecretString::from("k1".to_owned());
        let value = api_key_value(&key).unwrap();
        assert!(value.is_sensitive());
        assert_eq!(value.to_str().unwrap(), "k1");
    }

    #[test]
    fn newline_in_key_is_rejected() {
        let key = SecretString::from("k1\nX-Other: 1".to_owned());
        assert!(matches!(api_key_value(&key), Err(Error::MalformedApiKey)));
    }
}
