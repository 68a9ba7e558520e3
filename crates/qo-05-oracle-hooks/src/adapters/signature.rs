//! # Ed25519 Vote-Extension Signatures
//!
//! The validator identity doubles as its ed25519 public key.

use crate::domain::errors::SignatureError;
use crate::ports::outbound::ExtensionSignatureVerifier;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use shared_types::ValidatorId;

/// Ed25519 signature verifier
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Verifier;

impl ExtensionSignatureVerifier for Ed25519Verifier {
    fn verify(
        &self,
        validator: &ValidatorId,
        sign_bytes: &[u8],
        signature: &[u8],
    ) -> Result<(), SignatureError> {
        let verifying_key = VerifyingKey::from_bytes(validator.as_bytes())
            .map_err(|_| SignatureError::InvalidPublicKey)?;

        let bytes: &[u8; 64] = signature
            .try_into()
            .map_err(|_| SignatureError::InvalidLength(signature.len()))?;
        let sig = ed25519_dalek::Signature::from_bytes(bytes);

        verifying_key
            .verify(sign_bytes, &sig)
            .map_err(|_| SignatureError::VerificationFailed)
    }
}

/// Ed25519 signer for a local validator key
pub struct Ed25519Signer {
    signing_key: SigningKey,
}

impl Ed25519Signer {
    /// Create from secret seed (32 bytes).
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Identity matching this key
    pub fn validator_id(&self) -> ValidatorId {
        ValidatorId::new(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign (deterministic, no RNG needed).
    pub fn sign(&self, sign_bytes: &[u8]) -> Vec<u8> {
        self.signing_key.sign(sign_bytes).to_bytes().to_vec()
    }
}
