use thiserror::Error;

/// Image types accepted for the CV photo.
const ACCEPTED_MIME_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Upper bound on the decoded photo size.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error, PartialEq)]
pub enum PhotoError {
    #[error("La foto debe ser una imagen codificada como data URI")]
    NotADataUri,

    #[error("Tipo de archivo no soportado ({0}). Usa PNG, JPEG, GIF o WebP")]
    UnsupportedType(String),

    #[error("La imagen debe estar codificada en base64")]
    NotBase64,

    #[error("La imagen está vacía")]
    Empty,

    #[error("La imagen supera el tamaño máximo de {max} bytes")]
    TooLarge { max: usize },
}

/// Checks that `uri` is a `data:<image mime>;base64,<payload>` URI with an
/// accepted image type and a payload within [`MAX_PHOTO_BYTES`].
/// The payload is not decoded; its size is estimated from the base64 length.
pub fn validate_photo_data_uri(uri: &str) -> Result<(), PhotoError> {
    let rest = uri
        .trim()
        .strip_prefix("data:")
        .ok_or(PhotoError::NotADataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(PhotoError::NotADataUri)?;

    let mut parts = header.split(';');
    let mime = parts.next().unwrap_or_default().to_ascii_lowercase();
    if !ACCEPTED_MIME_TYPES.contains(&mime.as_str()) {
        let shown = if mime.is_empty() { "desconocido".to_string() } else { mime };
        return Err(PhotoError::UnsupportedType(shown));
    }
    if !parts.any(|p| p.eq_ignore_ascii_case("base64")) {
        return Err(PhotoError::NotBase64);
    }

    let payload = payload.trim();
    if payload.is_empty() {
        return Err(PhotoError::Empty);
    }
    if !is_canonical_base64(payload) {
        return Err(PhotoError::NotBase64);
    }

    if estimated_decoded_len(payload) > MAX_PHOTO_BYTES {
        return Err(PhotoError::TooLarge {
            max: MAX_PHOTO_BYTES,
        });
    }

    Ok(())
}

/// Standard alphabet, length a multiple of 4, `=` only as one or two
/// trailing padding characters.
fn is_canonical_base64(payload: &str) -> bool {
    if payload.len() % 4 != 0 {
        return false;
    }
    let body = payload.trim_end_matches('=');
    if payload.len() - body.len() > 2 {
        return false;
    }
    body.bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/'))
}

fn estimated_decoded_len(payload: &str) -> usize {
    let padding = payload.bytes().rev().take_while(|&b| b == b'=').count();
    (payload.len() / 4 * 3).saturating_sub(padding)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY_PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn test_accepts_png() {
        assert_eq!(validate_photo_data_uri(TINY_PNG), Ok(()));
    }

    #[test]
    fn test_accepts_uppercase_jpeg_mime() {
        assert_eq!(validate_photo_data_uri("data:IMAGE/JPEG;base64,/9j/4AAQ"), Ok(()));
        assert_eq!(validate_photo_data_uri("data:image/gif;base64,R0lGOQ=="), Ok(()));
    }

    #[test]
    fn test_rejects_pdf() {
        let err = validate_photo_data_uri("data:application/pdf;base64,JVBERi0x").unwrap_err();
        assert_eq!(err, PhotoError::UnsupportedType("application/pdf".to_string()));
    }

    #[test]
    fn test_rejects_plain_text() {
        assert_eq!(
            validate_photo_data_uri("hello.png"),
            Err(PhotoError::NotADataUri)
        );
    }

    #[test]
    fn test_rejects_non_base64_payload() {
        assert_eq!(
            validate_photo_data_uri("data:image/png,rawbytes"),
            Err(PhotoError::NotBase64)
        );
        assert_eq!(
            validate_photo_data_uri("data:image/png;base64,not base64!"),
            Err(PhotoError::NotBase64)
        );
        for payload in ["A", "=", "A=A=", "AAAAA", "==AB", "A==="] {
            let uri = format!("data:image/png;base64,{payload}");
            assert_eq!(
                validate_photo_data_uri(&uri),
                Err(PhotoError::NotBase64),
                "accepted {payload:?}"
            );
        }
    }

    #[test]
    fn test_rejects_empty_payload() {
        assert_eq!(
            validate_photo_data_uri("data:image/png;base64,"),
            Err(PhotoError::Empty)
        );
    }

    #[test]
    fn test_rejects_oversized_payload() {
        let payload = "A".repeat((MAX_PHOTO_BYTES / 3 + 1) * 4);
        let uri = format!("data:image/png;base64,{payload}");
        assert_eq!(
            validate_photo_data_uri(&uri),
            Err(PhotoError::TooLarge {
                max: MAX_PHOTO_BYTES
            })
        );
    }

    #[test]
    fn test_estimated_len_accounts_for_padding() {
        assert_eq!(estimated_decoded_len("QQ=="), 1);
        assert_eq!(estimated_decoded_len("QUI="), 2);
        assert_eq!(estimated_decoded_len("QUJD"), 3);
    }
}
