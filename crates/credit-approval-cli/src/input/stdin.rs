use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Decode a command's input document piped on stdin. An interactive
/// terminal yields `None` so the command falls back to its flags.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    read_piped(io::stdin().lock())
}

/// Blank input counts as "nothing piped", not as a parse failure.
pub fn read_piped<T: DeserializeOwned>(
    mut reader: impl Read,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let mut document = String::new();
    reader.read_to_string(&mut document)?;

    let document = document.trim();
    if document.is_empty() {
        return Ok(None);
    }

    let parsed = serde_json::from_str(document)
        .map_err(|e| format!("Failed to parse piped input: {e}"))?;
    tracing::debug!(bytes = document.len(), "decoded piped input");
    Ok(Some(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use credit_approval_core::amortization::InstallmentInput;
    use rust_decimal_macros::dec;

    #[test]
    fn test_blank_pipe_falls_back_to_flags() {
        let parsed: Option<InstallmentInput> = read_piped(" \n\t".as_bytes()).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_piped_installment_request() {
        let doc = r#"{ "principal": "100000", "annual_rate_percent": "12", "tenure_months": 12 }"#;
        let parsed: InstallmentInput = read_piped(doc.as_bytes()).unwrap().unwrap();
        assert_eq!(parsed.principal, dec!(100000));
        assert_eq!(parsed.tenure_months, 12);
    }

    #[test]
    fn test_malformed_pipe_is_an_error() {
        let err = read_piped::<InstallmentInput>("{ not json".as_bytes()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse piped input"));
    }
}
