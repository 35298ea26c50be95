use crate::Error;
use ed25519_dalek::{PublicKey, Signature, Verifier, SIGNATURE_LENGTH};

/// Checks that an inbound webhook was signed by the platform.
///
/// The signed message is the timestamp header followed by the raw, unmodified request body. The
/// body is only borrowed, so the same bytes can be decoded once verification succeeds.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    public_key: PublicKey,
}

impl SignatureVerifier {
    pub fn new(public_key: PublicKey) -> SignatureVerifier {
        SignatureVerifier { public_key }
    }

    pub fn verify(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
        body: &[u8],
    ) -> Result<(), Error> {
        let signature = signature.ok_or(Error::MissingSignature)?;
        let timestamp = timestamp.ok_or(Error::MissingTimestamp)?;

        if signature.len() != SIGNATURE_LENGTH * 2 {
            return Err(Error::InvalidSignatureLength);
        }

        let mut bytes = [0u8; SIGNATURE_LENGTH];
        hex::decode_to_slice(signature, &mut bytes).map_err(Error::InvalidSignatureFormat)?;
        let signature = Signature::try_from(&bytes[..]).map_err(Error::InvalidSignature)?;

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.public_key
            .verify(&message, &signature)
            .map_err(Error::InvalidSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{keypair, sign};

    fn verifier() -> SignatureVerifier {
        SignatureVerifier::new(keypair().public)
    }

    const TIMESTAMP: &str = "1700000000";
    const BODY: &[u8] = br#"{"type":1}"#;

    #[test]
    fn test_valid_signature() {
        let signature = sign(&keypair(), TIMESTAMP, BODY);
        assert!(verifier()
            .verify(Some(&signature), Some(TIMESTAMP), BODY)
            .is_ok());
    }

    #[test]
    fn test_mutated_body() {
        let signature = sign(&keypair(), TIMESTAMP, BODY);

        for i in 0..BODY.len() {
            let mut body = BODY.to_vec();
            body[i] ^= 0x01;
            assert!(verifier()
                .verify(Some(&signature), Some(TIMESTAMP), &body)
                .is_err());
        }
    }

    #[test]
    fn test_mutated_timestamp() {
        let signature = sign(&keypair(), TIMESTAMP, BODY);
        assert!(verifier()
            .verify(Some(&signature), Some("1700000001"), BODY)
            .is_err());
    }

    #[test]
    fn test_mutated_signature() {
        let signature = sign(&keypair(), TIMESTAMP, BODY);
        let mut bytes = hex::decode(&signature).unwrap();

        for i in [0, 31, 32, 62] {
            bytes[i] ^= 0x01;
            let mutated = hex::encode(&bytes);
            assert!(verifier()
                .verify(Some(&mutated), Some(TIMESTAMP), BODY)
                .is_err());
            bytes[i] ^= 0x01;
        }
    }

    #[test]
    fn test_missing_headers() {
        let signature = sign(&keypair(), TIMESTAMP, BODY);

        assert!(matches!(
            verifier().verify(None, Some(TIMESTAMP), BODY),
            Err(Error::MissingSignature)
        ));
        assert!(matches!(
            verifier().verify(Some(&signature), None, BODY),
            Err(Error::MissingTimestamp)
        ));
    }

    #[test]
    fn test_wrong_length() {
        let signature = sign(&keypair(), TIMESTAMP, BODY);

        assert!(matches!(
            verifier().verify(Some(&signature[2..]), Some(TIMESTAMP), BODY),
            Err(Error::InvalidSignatureLength)
        ));
        assert!(matches!(
            verifier().verify(Some(""), Some(TIMESTAMP), BODY),
            Err(Error::InvalidSignatureLength)
        ));
    }

    #[test]
    fn test_non_hex_signature() {
        let signature = "zz".repeat(SIGNATURE_LENGTH);
        assert!(matches!(
            verifier().verify(Some(&signature), Some(TIMESTAMP), BODY),
            Err(Error::InvalidSignatureFormat(_))
        ));
    }
}
