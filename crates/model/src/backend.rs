use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use vitrine_schema::BackendKind;

/// Encode a logical wire value into its at-rest form.
#[must_use]
pub fn encode(kind: BackendKind, logical: &str) -> String {
    match kind {
        BackendKind::Plain | BackendKind::Csv | BackendKind::Serialized => logical.to_owned(),
        BackendKind::Obscured => BASE64.encode(logical),
    }
}

/// Decode an at-rest value back into its logical wire form.
pub fn decode(kind: BackendKind, raw: &str) -> Result<String, String> {
    match kind {
        BackendKind::Plain | BackendKind::Csv | BackendKind::Serialized => Ok(raw.to_owned()),
        BackendKind::Obscured => {
            let bytes = BASE64
                .decode(raw)
                .map_err(|e| format!("not valid base64: {e}"))?;
            String::from_utf8(bytes).map_err(|_| "decoded bytes are not UTF-8".to_owned())
        }
    }
}

/// Split a CSV wire value into trimmed elements.
///
/// The empty string is the empty list, not a list of one empty element.
#[must_use]
pub fn split_csv(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|part| part.trim().to_owned()).collect()
}

/// Join elements into the canonical CSV wire form.
#[must_use]
pub fn join_csv<S: AsRef<str>>(elements: &[S]) -> String {
    elements
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}
