use crate::model::signing_session::RoleData;

/// Signable document container, implemented by the hosting application.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait DocumentSigningHandle: Send + Sync {
    /// Adds a pending signature for `certificate_pem` to the container
    ///
    /// Returns the base64 encoded digest the remote signer has to sign. An
    /// empty string means the container refused to prepare a signature.
    async fn prepare_signature(
        &self,
        certificate_pem: &str,
        role_data: Option<RoleData>,
    ) -> anyhow::Result<String>;

    /// Embeds the raw signature value into the pending signature
    async fn finalize_signature(&self, signature: &[u8]) -> anyhow::Result<()>;
}
