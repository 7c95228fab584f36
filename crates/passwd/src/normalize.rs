//! Password canonicalization (NFKC)
//!
//! The same password typed through different input methods can arrive as
//! different code point sequences, e.g. `é` as U+00E9 or as `e` + U+0301.
//! NFKC maps both to one byte sequence before the KDF ever sees it.

use passwd_core::{PasswdError, PasswdResult};
use secrecy::SecretSlice;
use unicode_normalization::UnicodeNormalization;

/// Normalize a UTF-8 password to NFKC.
///
/// The result is zeroized on drop. Input that is not UTF-8 fails with
/// `InvalidPassword`.
pub fn normalize(password: &[u8]) -> PasswdResult<SecretSlice<u8>> {
    let normalized = nfkc(password)?;
    Ok(SecretSlice::from(normalized.into_bytes()))
}

/// Normalize a password and reject it with `PasswordRequired` if nothing
/// but whitespace remains. The returned bytes are the untrimmed NFKC form.
pub fn normalize_required(password: &[u8]) -> PasswdResult<SecretSlice<u8>> {
    let normalized = nfkc(password)?;
    if is_blank(&normalized) {
        return Err(PasswdError::PasswordRequired);
    }
    Ok(SecretSlice::from(normalized.into_bytes()))
}

/// True when `text` has no code points once surrounding Unicode
/// whitespace is ignored.
pub fn is_blank(text: &str) -> bool {
    text.trim().chars().count() == 0
}

fn nfkc(password: &[u8]) -> PasswdResult<String> {
    let text = std::str::from_utf8(password)?;
    Ok(text.nfkc().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    const PRECOMPOSED: &str = "1234567\u{e9}";
    const COMBINING: &str = "1234567e\u{301}";

    #[test]
    fn test_forms_differ_before_normalization() {
        assert_ne!(PRECOMPOSED, COMBINING);
        assert_eq!(PRECOMPOSED.len(), 9);
        assert_eq!(COMBINING.len(), 10);
    }

    #[test]
    fn test_forms_equal_after_normalization() {
        let a = normalize(PRECOMPOSED.as_bytes()).unwrap();
        let b = normalize(COMBINING.as_bytes()).unwrap();

        assert_eq!(a.expose_secret(), b.expose_secret());
        assert_eq!(a.expose_secret().len(), 9);
        let text = std::str::from_utf8(a.expose_secret()).unwrap();
        assert_eq!(text.chars().count(), 8);
    }

    #[test]
    fn test_compatibility_mapping() {
        // Fullwidth digits and the "fi" ligature fold to their ASCII forms
        let n = normalize("\u{ff11}\u{ff12}\u{fb01}".as_bytes()).unwrap();
        assert_eq!(n.expose_secret(), b"12fi");
    }

    #[test]
    fn test_ascii_passthrough() {
        let n = normalize(b"correct horse battery staple").unwrap();
        assert_eq!(n.expose_secret(), b"correct horse battery staple");
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let result = normalize(&[0x66, 0x6f, 0xff, 0x6f]);
        assert!(matches!(
            result,
            Err(PasswdError::InvalidPassword(_))
        ));
    }

    #[test]
    fn test_blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("   \t\n"));
        assert!(is_blank("\u{3000}"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn test_required_rejects_blank() {
        for blank in ["", "   \t\n", "\u{3000}"] {
            assert!(matches!(
                normalize_required(blank.as_bytes()),
                Err(PasswdError::PasswordRequired)
            ));
        }
        assert!(matches!(
            normalize_required(&[0xff]),
            Err(PasswdError::InvalidPassword(_))
        ));
    }

    #[test]
    fn test_required_keeps_untrimmed_form() {
        let n = normalize_required(" 1234567e\u{301} ".as_bytes()).unwrap();
        assert_eq!(n.expose_secret(), " 1234567\u{e9} ".as_bytes());
    }

    #[test]
    fn test_surrounding_whitespace_preserved() {
        let n = normalize(b" secret ").unwrap();
        assert_eq!(n.expose_secret(), b" secret ");
    }
}
