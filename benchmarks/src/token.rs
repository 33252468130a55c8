//! Compact JSON Web Signatures over the three benchmarked schemes.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use rsa::pkcs1v15;
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::RsaPrivateKey;
use serde_json::{json, Value};
use sha2::Sha256;

use jwt_bench_config::Scheme;

use crate::error::HarnessError;

/// Length of the generated HMAC secret in bytes.
pub const HMAC_KEY_LEN: usize = 24;

type HmacSha256 = Hmac<Sha256>;

pub trait TokenSigner: Send + Sync {
    /// JWS `alg` header value.
    fn algorithm(&self) -> &'static str;

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, HarnessError>;

    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), HarnessError>;
}

/// RS256: RSASSA-PKCS1-v1_5 with SHA-256.
pub struct RsaSigner {
    signing_key: pkcs1v15::SigningKey<Sha256>,
    verifying_key: pkcs1v15::VerifyingKey<Sha256>,
}

impl RsaSigner {
    pub fn generate(bits: usize) -> Result<Self, HarnessError> {
        let key = RsaPrivateKey::new(&mut OsRng, bits)?;
        Ok(Self::from_key(key))
    }

    pub fn from_key(key: RsaPrivateKey) -> Self {
        let verifying_key = pkcs1v15::VerifyingKey::new(key.to_public_key());
        Self {
            signing_key: pkcs1v15::SigningKey::new(key),
            verifying_key,
        }
    }
}

impl TokenSigner for RsaSigner {
    fn algorithm(&self) -> &'static str {
        "RS256"
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, HarnessError> {
        let signature = self
            .signing_key
            .try_sign(message)
            .map_err(|err| HarnessError::Signing(err.to_string()))?;
        Ok(signature.to_vec())
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), HarnessError> {
        let signature = pkcs1v15::Signature::try_from(signature)
            .map_err(|err| HarnessError::Verification(err.to_string()))?;
        self.verifying_key
            .verify(message, &signature)
            .map_err(|err| HarnessError::Verification(err.to_string()))
    }
}

/// ES256: ECDSA on P-256 with SHA-256, signature encoded as fixed-width `r || s`.
pub struct EcdsaSigner {
    signing_key: p256::ecdsa::SigningKey,
}

impl EcdsaSigner {
    pub fn generate() -> Self {
        Self {
            signing_key: p256::ecdsa::SigningKey::random(&mut OsRng),
        }
    }
}

impl TokenSigner for EcdsaSigner {
    fn algorithm(&self) -> &'static str {
        "ES256"
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, HarnessError> {
        use p256::ecdsa::signature::Signer as _;

        let signature: p256::ecdsa::Signature = self
            .signing_key
            .try_sign(message)
            .map_err(|err| HarnessError::Signing(err.to_string()))?;
        Ok(signature.to_bytes().to_vec())
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), HarnessError> {
        use p256::ecdsa::signature::Verifier as _;

        let signature = p256::ecdsa::Signature::from_slice(signature)
            .map_err(|err| HarnessError::Verification(err.to_string()))?;
        self.signing_key
            .verifying_key()
            .verify(message, &signature)
            .map_err(|err| HarnessError::Verification(err.to_string()))
    }
}

/// HS256: HMAC with SHA-256.
pub struct HmacSigner {
    key: Vec<u8>,
}

impl HmacSigner {
    pub fn generate() -> Self {
        let mut key = vec![0u8; HMAC_KEY_LEN];
        OsRng.fill_bytes(&mut key);
        Self { key }
    }

    pub fn from_key(key: Vec<u8>) -> Self {
        Self { key }
    }

    fn mac(&self, message: &[u8]) -> Result<HmacSha256, HarnessError> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.key)
            .map_err(|err| HarnessError::Signing(err.to_string()))?;
        mac.update(message);
        Ok(mac)
    }
}

impl TokenSigner for HmacSigner {
    fn algorithm(&self) -> &'static str {
        "HS256"
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, HarnessError> {
        Ok(self.mac(message)?.finalize().into_bytes().to_vec())
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), HarnessError> {
        self.mac(message)?
            .verify_slice(signature)
            .map_err(|err| HarnessError::Verification(err.to_string()))
    }
}

/// Generate a fresh key for `scheme`.
pub fn signer_for(scheme: Scheme, rsa_bits: usize) -> Result<Box<dyn TokenSigner>, HarnessError> {
    Ok(match scheme {
        Scheme::Rsa => Box::new(RsaSigner::generate(rsa_bits)?),
        Scheme::Ecdsa => Box::new(EcdsaSigner::generate()),
        Scheme::Hmac => Box::new(HmacSigner::generate()),
    })
}

/// Sign `claims` and return the token in compact serialization.
pub fn issue_token(signer: &dyn TokenSigner, claims: &Value) -> Result<String, HarnessError> {
    let header = json!({ "alg": signer.algorithm(), "typ": "JWT" });
    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?),
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?),
    );

    let signature = signer.sign(signing_input.as_bytes())?;
    Ok(format!(
        "{signing_input}.{}",
        URL_SAFE_NO_PAD.encode(signature)
    ))
}

/// Check the signature and algorithm of a compact token issued by `signer`.
pub fn verify_token(signer: &dyn TokenSigner, token: &str) -> Result<Value, HarnessError> {
    let invalid = |reason: &str| HarnessError::Verification(reason.to_string());

    let (signing_input, signature) = token
        .rsplit_once('.')
        .ok_or_else(|| invalid("missing signature segment"))?;
    let (header, claims) = signing_input
        .split_once('.')
        .ok_or_else(|| invalid("missing claims segment"))?;

    let decode = |segment: &str| {
        URL_SAFE_NO_PAD
            .decode(segment)
            .map_err(|err| HarnessError::Verification(err.to_string()))
    };

    let header: Value = serde_json::from_slice(&decode(header)?)?;
    if header["alg"] != signer.algorithm() {
        return Err(invalid("algorithm mismatch"));
    }

    signer.verify(signing_input.as_bytes(), &decode(signature)?)?;
    Ok(serde_json::from_slice(&decode(claims)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Small modulus keeps key generation fast in debug builds.
    const TEST_RSA_BITS: usize = 512;

    fn claims() -> Value {
        json!({ "data": "this is a signed token" })
    }

    fn check_round_trip(signer: &dyn TokenSigner) {
        let token = issue_token(signer, &claims()).unwrap();

        assert_eq!(token.split('.').count(), 3);
        assert!(!token.contains('='));
        assert_eq!(verify_token(signer, &token).unwrap(), claims());
    }

    #[test]
    fn rsa_tokens_verify() {
        let signer = RsaSigner::generate(TEST_RSA_BITS).unwrap();
        check_round_trip(&signer);
    }

    #[test]
    fn ecdsa_tokens_verify() {
        let signer = EcdsaSigner::generate();
        check_round_trip(&signer);

        let signature = signer.sign(b"payload").unwrap();
        assert_eq!(signature.len(), 64);
    }

    #[test]
    fn hmac_tokens_verify() {
        let signer = HmacSigner::generate();
        assert_eq!(signer.key.len(), HMAC_KEY_LEN);
        check_round_trip(&signer);
    }

    #[test]
    fn hmac_signature_matches_known_vector() {
        // RFC 4231, test case 2.
        let signer = HmacSigner::from_key(b"Jefe".to_vec());
        let signature = signer.sign(b"what do ya want for nothing?").unwrap();

        let hex: String = signature.iter().map(|b| format!("{b:02x}")).collect();
        assert_eq!(
            hex,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn header_names_algorithm() {
        let signer = HmacSigner::generate();
        let token = issue_token(&signer, &claims()).unwrap();

        let header = token.split('.').next().unwrap();
        let header: Value = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(header).unwrap()).unwrap();
        assert_eq!(header, json!({ "alg": "HS256", "typ": "JWT" }));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let signer = EcdsaSigner::generate();
        let token = issue_token(&signer, &claims()).unwrap();

        let forged_claims = URL_SAFE_NO_PAD.encode(br#"{"data":"forged"}"#);
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = &forged_claims;
        let forged = parts.join(".");

        assert!(matches!(
            verify_token(&signer, &forged),
            Err(HarnessError::Verification(_))
        ));
    }

    #[test]
    fn token_from_other_key_is_rejected() {
        let token = issue_token(&HmacSigner::generate(), &claims()).unwrap();
        assert!(verify_token(&HmacSigner::generate(), &token).is_err());
        assert!(verify_token(&EcdsaSigner::generate(), &token).is_err());
    }

    #[test]
    fn signer_for_each_scheme() {
        let algorithms: Vec<_> = Scheme::ALL
            .into_iter()
            .map(|scheme| signer_for(scheme, TEST_RSA_BITS).unwrap().algorithm())
            .collect();
        assert_eq!(algorithms, ["RS256", "ES256", "HS256"]);
    }
}
